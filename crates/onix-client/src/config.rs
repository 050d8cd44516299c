//! Client configuration.

use std::time::Duration;

/// Address the backend listens on when started with its defaults.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5871";

/// Upper bound on a single request, including slow mutations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings used to build an [`OnixClient`](crate::OnixClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the GraphQL endpoint.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
