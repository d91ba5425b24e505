//! Error types for Skyward
//!
//! The simulation step itself never fails. These cover startup, configuration
//! loading and the storage collaborator.

use thiserror::Error;

/// Main error type for the game
#[derive(Debug, Error)]
pub enum Error {
    #[error("rendering surface missing: {0}")]
    SurfaceMissing(String),

    #[error("GPU setup failed: {0}")]
    Gpu(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias using the game's Error type
pub type Result<T> = std::result::Result<T, Error>;
