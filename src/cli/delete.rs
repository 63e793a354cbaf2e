use crate::db::{get_connection, get_statement, init_db, purge_statement};
use crate::error::Result;
use crate::settings::db_path;

pub fn run(id: i64) -> Result<()> {
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;
    let record = get_statement(&conn, id)?;
    purge_statement(&conn, &record)?;
    println!(
        "Deleted record {id} ({})",
        record.transaction_period.as_deref().unwrap_or("기간 없음")
    );
    Ok(())
}
