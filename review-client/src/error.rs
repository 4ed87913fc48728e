//! Client error types

use reqwest::StatusCode;
use review_core::ReviewError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected locally by the review engine, nothing was sent
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// A transition is already in flight
    #[error("Another review action is still in progress")]
    Busy,

    #[error("No order is open for review")]
    NoOpenOrder,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Message suitable for showing to the reviewer
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(e) if e.is_timeout() => "The server took too long to answer".to_string(),
            ClientError::Http(_) => "Could not reach the server".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a backend rejection
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the request never produced a backend answer
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = ClientError::Api {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Empresa inválida".to_string(),
        };
        assert_eq!(err.user_message(), "Empresa inválida");
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Empresa inválida (422 Unprocessable Entity)");

        let err = ClientError::from(ReviewError::MissingReason("cancel"));
        assert_eq!(err.user_message(), "A reason is required to cancel");
        assert_eq!(err.status(), None);
    }
}
