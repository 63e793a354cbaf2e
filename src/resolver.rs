//! Column resolution against drifting report headers.
//!
//! Settlement exports rename columns between report vintages, usually by
//! adding or dropping internal spaces and parentheses. Each semantic field
//! therefore carries an ordered alias list; resolution tries exact equality
//! for every alias first, then a normalized substring match. A miss is not
//! an error; the caller treats the column as summing to 0.

/// Strip spaces and parentheses so "배민1 중개이용료" and "배민1중개이용료"
/// compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')'))
        .collect()
}

/// Find the column for an alias list. Aliases are tried in priority order;
/// within an alias, columns in their original order. Returns the column
/// index, or `None` when nothing matches.
pub fn resolve_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        if let Some(idx) = headers.iter().position(|h| h == alias) {
            return Some(idx);
        }
    }
    for alias in aliases {
        let needle = normalize(alias);
        if needle.is_empty() {
            continue;
        }
        if let Some(idx) = headers
            .iter()
            .position(|h| normalize(h).contains(&needle))
        {
            return Some(idx);
        }
    }
    None
}
