//! Error types for the drill engine.
//!
//! None of these reach the learner. Generation errors are caller bugs the
//! controller rules out up front; storage errors are logged and discarded.

use thiserror::Error;

/// Errors emitted by problem generation.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrillError {
    #[error("no tables selected")]
    EmptySelection,
    #[error("problem count must be at least 1")]
    ZeroCount,
}

/// Errors emitted by a [`Storage`](crate::drill_engine::storage::Storage) backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors emitted while loading a [`DrillConfig`](crate::drill_engine::config::DrillConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
