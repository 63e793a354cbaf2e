use colored::Colorize;
use comfy_table::Table;
use serde_json::json;

use crate::db::{get_connection, init_db, monthly_stats};
use crate::error::Result;
use crate::fmt::won;
use crate::settings::db_path;

pub fn run(json: bool) -> Result<()> {
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;
    let (monthly, summary) = monthly_stats(&conn)?;

    if json {
        let payload = json!({ "monthly": monthly, "total": summary });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        return Ok(());
    }

    if summary.total_records == 0 {
        println!("No conversions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["월", "건수", "총매출", "매출원가", "매출총이익", "입금금액"]);
    for m in &monthly {
        table.add_row(vec![
            m.month.clone(),
            m.count.to_string(),
            won(m.total_sales),
            won(m.total_cost),
            won(m.gross_profit),
            won(m.deposit_amount),
        ]);
    }
    println!("{table}");
    println!(
        "{} {} conversions, 총매출 {}, 매출총이익 {}",
        "Total:".bold(),
        summary.total_records,
        won(summary.total_sales),
        won(summary.gross_profit),
    );
    Ok(())
}
