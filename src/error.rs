use thiserror::Error;

#[derive(Error, Debug)]
pub enum PnlError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet read error: {0}")]
    SheetRead(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    SheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("No worksheet in {0}")]
    EmptyWorkbook(String),

    #[error("Unknown field key: {0}")]
    UnknownField(String),

    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PnlError>;
