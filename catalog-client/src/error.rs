//! Client error types

use shared::FormError;
use thiserror::Error;

/// Shown when the backend gives no usable `message`
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, TLS, body read...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Api { status: u16, message: Option<String> },

    /// Missing or rejected bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form validation failed before sending
    #[error(transparent)]
    Validation(#[from] FormError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Text to show inline next to the failed action
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            ClientError::Unauthorized(message) | ClientError::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the caller should go back to the login view.
    ///
    /// Besides 401/403, backends report auth problems in the message text.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ClientError::Unauthorized(_) => true,
            ClientError::Api {
                message: Some(message),
                ..
            } => {
                let message = message.to_lowercase();
                message.contains("no autorizado") || message.contains("token")
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
