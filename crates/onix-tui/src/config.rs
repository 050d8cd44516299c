//! Dashboard configuration.

use std::path::PathBuf;
use std::time::Duration;

use onix_client::ClientConfig;

/// Default location of the log file; the terminal is owned by the UI.
pub const DEFAULT_LOG_FILE: &str = "/tmp/onix-tui.log";

/// Default interval between two refreshes of the application list.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(3);

/// Settings gathered from the command line.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend connection settings.
    pub client: ClientConfig,
    /// Interval between two refreshes of the application list.
    pub refresh: Duration,
    /// File the dashboard logs to.
    pub log_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            refresh: DEFAULT_REFRESH,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.client.endpoint, "http://localhost:5871");
        assert_eq!(config.client.timeout, Duration::from_secs(10));
        assert_eq!(config.refresh, Duration::from_secs(3));
    }
}
