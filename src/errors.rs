use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Parse float error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("Parse date error: {0}")]
    ParseDate(#[from] chrono::ParseError),

    #[error("Quantity must be positive, got {0} tons")]
    InvalidQuantity(f64),

    #[error("Unrecognized contract code: {0:?} (expected e.g. \"sn2603\")")]
    InvalidContractCode(String),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Other: {0}")]
    Other(String),
}
