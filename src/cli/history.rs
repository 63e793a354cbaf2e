use comfy_table::Table;

use crate::db::{get_connection, init_db, list_statements, sweep_expired};
use crate::error::Result;
use crate::fmt::won;
use crate::settings::{db_path, load_settings};

pub fn run(json: bool) -> Result<()> {
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;
    // viewing history also runs the retention sweep, so stale rows never show
    sweep_expired(&conn, load_settings().retention_days)?;

    let records = list_statements(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records).unwrap_or_default());
        return Ok(());
    }

    if records.is_empty() {
        println!("No conversions yet. Run `baedal-pnl convert <file>` first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "거래기간", "업로드일", "총매출", "매출원가", "매출총이익", "입금금액", "파일",
    ]);
    for r in &records {
        table.add_row(vec![
            r.id.to_string(),
            r.transaction_period.clone().unwrap_or_else(|| "-".to_string()),
            r.upload_date.clone(),
            won(r.total_sales),
            won(r.total_cost),
            won(r.gross_profit),
            won(r.deposit_amount),
            r.upload_filename.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
