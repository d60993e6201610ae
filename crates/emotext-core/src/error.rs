//! Centralized error types for emotext.

use thiserror::Error;

/// Message returned to callers for any failure that is not theirs to see.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main error type for emotext operations.
#[derive(Error, Debug)]
pub enum EmotionError {
    #[error("{0}")]
    Validation(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for emotext operations.
pub type EmotionResult<T> = Result<T, EmotionError>;

impl EmotionError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The message a caller is allowed to see.
    ///
    /// Only validation and upstream errors carry their own text; everything
    /// else collapses to [`INTERNAL_ERROR_MESSAGE`].
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Upstream { message, .. } => message.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
