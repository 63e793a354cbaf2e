use crate::db::{get_connection, init_db, sweep_expired};
use crate::error::Result;
use crate::settings::{db_path, load_settings};

pub fn run(days: Option<i64>) -> Result<()> {
    let days = days.unwrap_or_else(|| load_settings().retention_days);
    let conn = get_connection(&db_path())?;
    init_db(&conn)?;
    let purged = sweep_expired(&conn, days)?;
    if purged == 0 {
        println!("Nothing older than {days} days.");
    } else {
        println!("Deleted {purged} conversion(s) older than {days} days.");
    }
    Ok(())
}
