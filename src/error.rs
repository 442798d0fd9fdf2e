/**
* filename : error
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TickerError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Insufficient data")]
    InsufficientData,

    #[error("Already running: {0}")]
    AlreadyRunning(String),

    #[error("Outside trading hours")]
    OutsideTradingHours,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
