//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Nothing in this taxonomy is fatal: remote and storage failures are caught
/// at the call site and turned into user-facing alerts, never propagated far
/// enough to tear down the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// The remote banking service failed (transport error or non-success
    /// response).
    #[error("Remote service error: {0}")]
    Remote(String),

    /// Persistent key/value storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input failed a validation rule.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Returns the error code used in logs and diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Remote(_) => "REMOTE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Returns true if the failure came from the remote service boundary.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
