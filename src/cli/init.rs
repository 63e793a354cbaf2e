use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = Settings::default();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }

    let base = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(base.join("uploads"))?;
    std::fs::create_dir_all(base.join("outputs"))?;

    let conn = get_connection(&base.join("baedal-pnl.db"))?;
    init_db(&conn)?;
    save_settings(&settings)?;

    println!("Initialized data directory at {}", settings.data_dir);
    Ok(())
}
