//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Toast text used when the server gave no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, broken body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered but refused the request (`success: false` or non-2xx)
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// No such entry in the local cache; carries the resource label
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local validation rejected the input; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The action is not available in the session's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The admin declined the confirmation prompt
    #[error("Cancelled by user")]
    Cancelled,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Text for the error toast
    ///
    /// Server-provided messages are shown verbatim; transport and decoding
    /// failures fall back to [`GENERIC_ERROR_MESSAGE`].
    pub fn toast_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Validation(message) | Self::InvalidState(message) => message.clone(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized => "Please sign in again.".to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether no request reached the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidState(_)
                | Self::NotFound(_)
                | Self::Cancelled
                | Self::Config(_)
        )
    }
}

impl From<shared::AppError> for ClientError {
    fn from(err: shared::AppError) -> Self {
        Self::Validation(err.message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
