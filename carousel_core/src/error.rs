// Typed errors with thiserror. Surface meaningful messages to JS.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Stale delivery: ticket {ticket} superseded by {current}")]
    StaleDelivery { ticket: u64, current: u64 },
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
