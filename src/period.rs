//! Transaction-period detection in the report banner rows.

use crate::sheet::Grid;

/// Banner rows scanned for a period label before the header row.
const SCAN_ROWS: usize = 5;

/// Find the transaction period ("2024.07.26 ~ 2024.08.26") in the first
/// banner rows, cell by cell in row-major order. Absence is not an error;
/// callers skip period-keyed dedup when this returns `None`.
pub fn extract_period(grid: &Grid) -> Option<String> {
    for row in grid.rows.iter().take(SCAN_ROWS) {
        for cell in row {
            let Some(text) = cell.text() else { continue };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if let Some(period) = match_labeled(text)
                .or_else(|| match_tilde_range(text))
                .or_else(|| match_dash_range(text))
            {
                return Some(period);
            }
        }
    }
    None
}

/// "거래기간: 2024.01.01 ~ 2024.01.31": strip the label and surrounding
/// punctuation, keep the remainder.
fn match_labeled(text: &str) -> Option<String> {
    if !text.contains("거래기간") {
        return None;
    }
    let stripped = text
        .replace("거래기간", "")
        .trim_matches(|c: char| c == ':' || c.is_whitespace())
        .to_string();
    (!stripped.is_empty()).then_some(stripped)
}

/// A bare date range with a `~` separator and enough date punctuation.
fn match_tilde_range(text: &str) -> Option<String> {
    let dots = text.matches('.').count();
    let dashes = text.matches('-').count();
    (text.contains('~') && (dots >= 4 || dashes >= 4)).then(|| text.to_string())
}

/// "24.07.26-24.08.26": dash-joined range, re-joined with " ~ ".
fn match_dash_range(text: &str) -> Option<String> {
    if text.matches('.').count() < 4 {
        return None;
    }
    let (left, right) = text.split_once('-')?;
    if left.contains('.') && right.contains('.') {
        Some(format!("{} ~ {}", left.trim(), right.trim()))
    } else {
        None
    }
}

/// Best-effort "YYYY-MM" from a period label, keyed on the range end date.
/// Used only to bucket statistics; `None` drops the record from the buckets.
pub fn month_from_period(period: &str) -> Option<String> {
    let period = period.trim();
    if period.is_empty() {
        return None;
    }

    let end = if let Some((_, right)) = period.split_once('~') {
        right.trim().to_string()
    } else {
        let parts: Vec<&str> = period.split('-').collect();
        if parts.len() >= 4 {
            // dash-only shape like 07-26-08-26: last two parts are the end
            format!("{}-{}", parts[parts.len() - 2], parts[parts.len() - 1])
        } else {
            period.to_string()
        }
    };

    let end = end.replace(['.', '/'], "-");
    let parts: Vec<&str> = end
        .split('-')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 2 {
        return None;
    }
    let year = if parts[0].len() == 4 {
        parts[0].to_string()
    } else {
        format!("20{}", parts[0])
    };
    Some(format!("{year}-{:0>2}", parts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Cell;

    fn grid_with(texts: &[&[&str]]) -> Grid {
        Grid {
            rows: texts
                .iter()
                .map(|row| row.iter().map(|s| Cell::Text(s.to_string())).collect())
                .collect(),
        }
    }

    #[test]
    fn test_labeled_period() {
        let grid = grid_with(&[&["정산내역서"], &["거래기간: 2024.01.01 ~ 2024.01.31"]]);
        assert_eq!(
            extract_period(&grid).as_deref(),
            Some("2024.01.01 ~ 2024.01.31")
        );
    }

    #[test]
    fn test_labeled_period_spaced_colon() {
        let grid = grid_with(&[&["거래기간 : 2024.02.01 ~ 2024.02.29"]]);
        assert_eq!(
            extract_period(&grid).as_deref(),
            Some("2024.02.01 ~ 2024.02.29")
        );
    }

    #[test]
    fn test_bare_tilde_range_verbatim() {
        let grid = grid_with(&[&["가게명", "2024.07.26 ~ 2024.08.26"]]);
        assert_eq!(
            extract_period(&grid).as_deref(),
            Some("2024.07.26 ~ 2024.08.26")
        );
    }

    #[test]
    fn test_dash_joined_range_rejoined() {
        let grid = grid_with(&[&["24.07.26-24.08.26"]]);
        assert_eq!(extract_period(&grid).as_deref(), Some("24.07.26 ~ 24.08.26"));
    }

    #[test]
    fn test_absent_period() {
        let grid = grid_with(&[&["정산내역서"], &["가게명"], &[], &[], &["뭔가 다른 것"]]);
        assert_eq!(extract_period(&grid), None);
    }

    #[test]
    fn test_scan_stops_after_banner_rows() {
        let mut rows = vec![vec![]; SCAN_ROWS];
        rows.push(vec![Cell::Text("2024.07.26 ~ 2024.08.26".to_string())]);
        assert_eq!(extract_period(&Grid { rows }), None);
    }

    #[test]
    fn test_label_without_value_is_skipped() {
        // labeled cell is empty after stripping; the bare range later wins
        let grid = grid_with(&[&["거래기간:", "2024.03.01 ~ 2024.03.31"]]);
        assert_eq!(
            extract_period(&grid).as_deref(),
            Some("2024.03.01 ~ 2024.03.31")
        );
    }

    #[test]
    fn test_month_from_period() {
        assert_eq!(
            month_from_period("2024.07.26 ~ 2024.08.26").as_deref(),
            Some("2024-08")
        );
        assert_eq!(
            month_from_period("24.07.26 ~ 24.08.26").as_deref(),
            Some("2024-08")
        );
        assert_eq!(month_from_period("").as_deref(), None);
        assert_eq!(month_from_period("기간없음").as_deref(), None);
    }

    #[test]
    fn test_month_from_period_single_date() {
        assert_eq!(month_from_period("2024-08-26").as_deref(), Some("2024-08"));
    }
}
