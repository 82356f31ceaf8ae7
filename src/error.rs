use thiserror::Error;

pub type Result<T> = std::result::Result<T, PunchcardError>;

#[derive(Error, Debug)]
pub enum PunchcardError {
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
