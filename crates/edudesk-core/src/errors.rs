//! Client error type shared by every Edudesk crate.
//!
//! Failures are always local to the component that issued the request; none of
//! these variants is fatal to the process.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No identity is stored in the session.
    #[error("Not logged in")]
    Unauthenticated,

    /// The identity exists but lacks the named permission token.
    #[error("Permission denied: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-success HTTP status not covered by a more specific variant.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    /// Operation not allowed in the component's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error bodies returned by the API. Only one of the keys is ever set.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

impl ClientError {
    /// Map a non-success HTTP status and its raw body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.detail).or(b.message))
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            401 => Self::Unauthenticated,
            403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Http { status, message },
        }
    }

    /// Whether a bounded retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Network(_) => true,
            Self::Http { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
