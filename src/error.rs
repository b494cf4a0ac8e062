use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("invalid {kind}: {value:?}")]
    InvalidCategory { kind: &'static str, value: String },
    #[error("invalid trip interval: {0}")]
    InvalidInterval(String),
    #[error("rate table configuration error: {0}")]
    Configuration(String),
    #[error("fare amount does not fit in an integer")]
    AmountOverflow,
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FareError>;
