use std::path::Path;

use rusqlite::Connection;

use crate::error::{PnlError, Result};
use crate::models::{MonthlyStat, NewStatement, StatementRecord, StatsSummary};
use crate::period::month_from_period;

/// History rows older than this many days are swept together with their
/// stored files.
pub const RETENTION_DAYS: i64 = 49;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS statements (
    id INTEGER PRIMARY KEY,
    upload_filename TEXT NOT NULL,
    transaction_period TEXT,
    input_path TEXT NOT NULL,
    output_path TEXT NOT NULL,
    upload_date TEXT NOT NULL,
    checksum TEXT,
    total_sales REAL NOT NULL,
    total_cost REAL NOT NULL,
    gross_profit REAL NOT NULL,
    deposit_amount REAL NOT NULL
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatementRecord> {
    Ok(StatementRecord {
        id: row.get(0)?,
        upload_filename: row.get(1)?,
        transaction_period: row.get(2)?,
        input_path: row.get(3)?,
        output_path: row.get(4)?,
        upload_date: row.get(5)?,
        checksum: row.get(6)?,
        total_sales: row.get(7)?,
        total_cost: row.get(8)?,
        gross_profit: row.get(9)?,
        deposit_amount: row.get(10)?,
    })
}

const RECORD_COLUMNS: &str = "id, upload_filename, transaction_period, input_path, output_path, \
     upload_date, checksum, total_sales, total_cost, gross_profit, deposit_amount";

pub fn insert_statement(conn: &Connection, new: &NewStatement) -> Result<i64> {
    let upload_date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO statements (upload_filename, transaction_period, input_path, output_path, \
         upload_date, checksum, total_sales, total_cost, gross_profit, deposit_amount) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            new.upload_filename,
            new.transaction_period,
            new.input_path,
            new.output_path,
            upload_date,
            new.checksum,
            new.total_sales,
            new.total_cost,
            new.gross_profit,
            new.deposit_amount,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_statements(conn: &Connection) -> Result<Vec<StatementRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM statements ORDER BY upload_date DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_record)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_statement(conn: &Connection, id: i64) -> Result<StatementRecord> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM statements WHERE id = ?1");
    conn.query_row(&sql, [id], map_record)
        .map_err(|_| PnlError::RecordNotFound(id))
}

pub fn find_by_period(conn: &Connection, period: &str) -> Result<Vec<StatementRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM statements WHERE transaction_period = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([period], map_record)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn find_by_checksum(conn: &Connection, checksum: &str) -> Result<Option<StatementRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM statements WHERE checksum = ?1 LIMIT 1");
    match conn.query_row(&sql, [checksum], map_record) {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn statements_older_than(conn: &Connection, cutoff: &str) -> Result<Vec<StatementRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM statements WHERE upload_date < ?1");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([cutoff], map_record)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Delete a record and best-effort remove its stored files.
pub fn purge_statement(conn: &Connection, record: &StatementRecord) -> Result<()> {
    let _ = std::fs::remove_file(&record.input_path);
    let _ = std::fs::remove_file(&record.output_path);
    conn.execute("DELETE FROM statements WHERE id = ?1", [record.id])?;
    Ok(())
}

/// Remove everything older than the retention window. Returns how many
/// records were purged.
pub fn sweep_expired(conn: &Connection, days: i64) -> Result<usize> {
    let cutoff = (chrono::Local::now() - chrono::Duration::days(days))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let expired = statements_older_than(conn, &cutoff)?;
    for record in &expired {
        purge_statement(conn, record)?;
    }
    Ok(expired.len())
}

/// Bucket all records by statement month (end date of the transaction
/// period). Records without a parseable period are counted only in the
/// grand total.
pub fn monthly_stats(conn: &Connection) -> Result<(Vec<MonthlyStat>, StatsSummary)> {
    let records = list_statements(conn)?;
    let mut summary = StatsSummary::default();
    let mut buckets: std::collections::BTreeMap<String, MonthlyStat> =
        std::collections::BTreeMap::new();

    for record in &records {
        summary.total_records += 1;
        summary.total_sales += record.total_sales;
        summary.total_cost += record.total_cost;
        summary.gross_profit += record.gross_profit;
        summary.deposit_amount += record.deposit_amount;

        let Some(month) = record
            .transaction_period
            .as_deref()
            .and_then(month_from_period)
        else {
            continue;
        };
        let stat = buckets.entry(month.clone()).or_insert_with(|| MonthlyStat {
            month,
            ..MonthlyStat::default()
        });
        stat.count += 1;
        stat.total_sales += record.total_sales;
        stat.total_cost += record.total_cost;
        stat.gross_profit += record.gross_profit;
        stat.deposit_amount += record.deposit_amount;
    }

    // newest month first
    let monthly: Vec<MonthlyStat> = buckets.into_values().rev().collect();
    Ok((monthly, summary))
}
