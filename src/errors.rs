/// Domain-specific error types for the simulator.
/// Core functions are pure and fail fast: the first violated precondition
/// is returned immediately, with no partial results and no silent clamping.
/// Only `main` turns these into user-facing messages and exit codes.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("input error: {0}")]
    InputValidation(String),

    #[error("no market data: {0}")]
    DataUnavailable(String),

    #[error("insufficient history: {got} usable samples, need at least {min}")]
    InsufficientData { got: usize, min: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("path length mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SimError {
    fn from(e: reqwest::Error) -> Self {
        SimError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
