//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Onix.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Application not found.
    #[error("Application not found: {0}")]
    AppNotFound(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
