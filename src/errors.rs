use thiserror::Error;

/// Error type shared by the ledger manager, persistence and configuration layers.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Ledger is still loading")]
    NotLoaded,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
