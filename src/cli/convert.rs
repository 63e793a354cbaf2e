use std::path::{Path, PathBuf};

use colored::Colorize;
use sha2::{Digest, Sha256};

use crate::convert::convert_file;
use crate::db::{find_by_checksum, find_by_period, get_connection, init_db, insert_statement, purge_statement};
use crate::error::{PnlError, Result};
use crate::fields::Overrides;
use crate::fmt::{percent, won};
use crate::models::NewStatement;
use crate::statement::ratio;
use crate::settings::{db_path, outputs_dir, uploads_dir};

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

pub fn run(file: &str, output: Option<&str>, map: &[String]) -> Result<()> {
    let file_path = PathBuf::from(file);
    if !file_path.exists() {
        return Err(PnlError::Other(format!("no such file: {file}")));
    }
    if !file_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
    {
        return Err(PnlError::Other("only .xlsx settlement exports are supported".to_string()));
    }
    let overrides = Overrides::parse(map)?;

    let conn = get_connection(&db_path())?;
    init_db(&conn)?;

    let checksum = compute_checksum(&file_path)?;
    if let Some(existing) = find_by_checksum(&conn, &checksum)? {
        println!(
            "This file was already converted (record {}). Delete it first to reconvert.",
            existing.id
        );
        return Ok(());
    }

    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("settlement.xlsx")
        .to_string();
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");

    let uploads = uploads_dir();
    let outputs = outputs_dir();
    std::fs::create_dir_all(&uploads)?;
    std::fs::create_dir_all(&outputs)?;

    let input_path = uploads.join(format!("{timestamp}_{filename}"));
    std::fs::copy(&file_path, &input_path)?;

    let output_path = match output {
        Some(p) => PathBuf::from(p),
        None => outputs.join(format!("손익계산서_{timestamp}.xlsx")),
    };

    let conv = convert_file(&input_path, &output_path, &overrides)?;

    // one statement per transaction period: replace earlier runs
    let mut replaced = 0;
    if let Some(period) = &conv.period {
        for old in find_by_period(&conn, period)? {
            purge_statement(&conn, &old)?;
            replaced += 1;
        }
    }

    insert_statement(
        &conn,
        &NewStatement {
            upload_filename: filename,
            transaction_period: conv.period.clone(),
            input_path: input_path.to_string_lossy().to_string(),
            output_path: output_path.to_string_lossy().to_string(),
            checksum: Some(checksum),
            total_sales: conv.totals.gross_sales,
            total_cost: conv.totals.cost_of_sales,
            gross_profit: conv.totals.gross_profit,
            deposit_amount: conv.totals.deposit_total,
        },
    )?;

    match &conv.period {
        Some(period) => println!("거래기간  {period}"),
        None => println!("거래기간  (없음)"),
    }
    let gross = conv.totals.gross_sales;
    println!("총매출    {}", won(gross).green());
    println!(
        "매출원가  {} ({})",
        won(conv.totals.cost_of_sales),
        percent(ratio(conv.totals.cost_of_sales, gross))
    );
    println!(
        "매출총이익 {} ({})",
        won(conv.totals.gross_profit).bold(),
        percent(ratio(conv.totals.gross_profit, gross))
    );
    println!("입금금액  {}", won(conv.totals.deposit_total).cyan());
    println!("\nSaved statement to {}", output_path.display());
    if replaced > 0 {
        println!("Replaced {replaced} earlier conversion(s) for the same period.");
    }
    Ok(())
}
