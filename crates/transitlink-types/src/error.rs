//! Error types for transitlink

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Failures reported by the remote vehicle registry.
///
/// `Unavailable` is a transport-level failure (connection refused, no
/// response); `Rejected` is a structured error status from the service
/// itself. The reconciliation layer treats both as "fall back to local",
/// but the distinction is kept for logging.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote registry unreachable: {0}")]
    Unavailable(String),

    #[error("Remote registry rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Vehicle not found in remote registry: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Remote registry error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to persist local fallback snapshot: {0}")]
    LocalPersist(String),

    #[error("Invalid vehicle: {0}")]
    InvalidVehicle(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
