use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown strategy: {0} (expected momentum, sma_crossover or rsi)")]
    UnknownStrategy(String),

    #[error("Price series is empty")]
    EmptySeries,

    #[error("Price series is not chronological at index {index}")]
    OutOfOrder { index: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Data loading error: {0}")]
    DataLoad(String),

    #[error("CSV parse error: {0}")]
    Csv(String),

    #[error("Brokerage error: {0}")]
    Brokerage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
