use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{PnlError, Result};

/// Settlement exports carry four banner rows above the column headers.
pub const HEADER_ROW: usize = 4;
pub const DATA_START_ROW: usize = 5;

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// A spreadsheet cell with its original type preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::String(s) => Cell::Text(s.clone()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Empty | Data::Error(_) => Cell::Empty,
        }
    }

    /// Numeric coercion: parse as a number, failures contribute 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => parse_number(s),
            Cell::Empty => 0.0,
        }
    }

    /// Text content for header/label scanning. Empty cells yield `None`.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Empty => None,
        }
    }
}

/// Parse an amount-like string: trims, drops thousands separators and a
/// trailing won sign. Anything unparseable counts as 0.
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.replace(',', "").replace('원', "").replace('₩', "");
    s.trim().parse().unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Grid and table
// ---------------------------------------------------------------------------

/// Raw 2-D cell grid, 0-indexed from A1 regardless of where the used range
/// of the worksheet begins.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

/// Header/data split of a grid per the fixed report shape.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn from_grid(grid: &Grid) -> Self {
        let headers = grid
            .rows
            .get(HEADER_ROW)
            .map(|row| {
                row.iter()
                    .map(|c| c.text().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let rows = if grid.rows.len() > DATA_START_ROW {
            grid.rows[DATA_START_ROW..].to_vec()
        } else {
            Vec::new()
        };
        Table { headers, rows }
    }

    /// Sum of one column over all data rows with numeric coercion.
    /// Short rows contribute 0 for the missing cells.
    pub fn column_sum(&self, idx: usize) -> f64 {
        self.rows
            .iter()
            .map(|row| row.get(idx).map_or(0.0, Cell::to_number))
            .sum()
    }
}

/// Load sheet 0 of an `.xlsx` workbook into a raw grid.
pub fn load_grid(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PnlError::EmptyWorkbook(path.display().to_string()))?;
    let range = workbook.worksheet_range(&name)?;

    let (top, left) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); top as usize];
    for raw_row in range.rows() {
        let mut row = vec![Cell::Empty; left as usize];
        row.extend(raw_row.iter().map(Cell::from_data));
        rows.push(row);
    }
    Ok(Grid { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1234"), 1234.0);
        assert_eq!(parse_number("1,234,567"), 1234567.0);
        assert_eq!(parse_number("  -42.5  "), -42.5);
        assert_eq!(parse_number("12,000원"), 12000.0);
        assert_eq!(parse_number("not_a_number"), 0.0);
        assert_eq!(parse_number(""), 0.0);
    }

    #[test]
    fn test_cell_to_number_coercion() {
        assert_eq!(Cell::Number(5.5).to_number(), 5.5);
        assert_eq!(text("300").to_number(), 300.0);
        assert_eq!(text("합계").to_number(), 0.0);
        assert_eq!(Cell::Empty.to_number(), 0.0);
    }

    #[test]
    fn test_table_from_grid_header_split() {
        let mut rows = vec![Vec::new(); HEADER_ROW];
        rows.push(vec![text("금액"), text("배달팁")]);
        rows.push(vec![Cell::Number(100.0), Cell::Number(10.0)]);
        rows.push(vec![Cell::Number(200.0)]);
        let table = Table::from_grid(&Grid { rows });
        assert_eq!(table.headers, vec!["금액", "배달팁"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_sum(0), 300.0);
        // short second row: missing cell counts as 0
        assert_eq!(table.column_sum(1), 10.0);
    }

    #[test]
    fn test_table_from_short_grid() {
        let table = Table::from_grid(&Grid { rows: vec![vec![text("제목")]] });
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
        assert_eq!(table.column_sum(0), 0.0);
    }

    #[test]
    fn test_column_sum_mixes_text_and_numbers() {
        let mut rows = vec![Vec::new(); DATA_START_ROW];
        rows[HEADER_ROW] = vec![text("금액")];
        rows.push(vec![Cell::Number(100.0)]);
        rows.push(vec![text("250")]);
        rows.push(vec![text("소계")]);
        rows.push(vec![Cell::Empty]);
        let table = Table::from_grid(&Grid { rows });
        assert_eq!(table.column_sum(0), 350.0);
    }
}
