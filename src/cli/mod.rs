pub mod cleanup;
pub mod convert;
pub mod delete;
pub mod history;
pub mod init;
pub mod stats;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "baedal-pnl",
    about = "Convert delivery-platform settlement spreadsheets into P&L statements."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up: choose a data directory and initialize the history database.
    Init {
        /// Path for converter data (default: ~/Documents/baedal-pnl)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Convert a settlement spreadsheet into a formatted P&L statement.
    Convert {
        /// Path to the settlement .xlsx export
        file: String,
        /// Output path for the statement (default: outputs/손익계산서_<timestamp>.xlsx)
        #[arg(long)]
        output: Option<String>,
        /// Pin a field to a column: <field>=<column name> (repeatable)
        #[arg(long = "map", value_name = "FIELD=COLUMN")]
        map: Vec<String>,
    },
    /// List past conversions.
    History {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Monthly statistics across all conversions.
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete conversions older than the retention window.
    Cleanup {
        /// Retention window in days (default from settings)
        #[arg(long)]
        days: Option<i64>,
    },
    /// Delete one conversion and its files.
    Delete {
        /// Record ID (shown in `baedal-pnl history`)
        id: i64,
    },
}
