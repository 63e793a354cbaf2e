use std::path::Path;

use crate::error::Result;
use crate::excel;
use crate::fields::{extract_fields, FieldMap, Overrides};
use crate::period::extract_period;
use crate::sheet::{load_grid, Table};
use crate::statement::Totals;

/// Everything one conversion run produces.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub period: Option<String>,
    pub fields: FieldMap,
    pub totals: Totals,
}

/// Full pipeline: load workbook → find the transaction period in the banner
/// rows → split header/data → extract field totals → aggregate → render the
/// statement workbook. Only a structurally unreadable input is an error;
/// header drift and junk cells degrade to zeroed fields.
pub fn convert_file(input: &Path, output: &Path, overrides: &Overrides) -> Result<Conversion> {
    let grid = load_grid(input)?;
    let period = extract_period(&grid);
    let table = Table::from_grid(&grid);
    let fields = extract_fields(&table, overrides);
    let totals = Totals::from_fields(&fields);
    excel::write_statement(output, &fields, &totals)?;
    Ok(Conversion {
        period,
        fields,
        totals,
    })
}
