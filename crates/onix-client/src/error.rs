//! Error types for the Onix client.

use onix_core::OperationError;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to build the underlying HTTP client.
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered with GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response does not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Message suitable for showing to the user.
    ///
    /// Backend errors are passed through as-is; they are already phrased for
    /// end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::GraphQl(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<ClientError> for OperationError {
    fn from(err: ClientError) -> Self {
        OperationError::new(err.user_message())
    }
}
