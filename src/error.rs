//! Error types for device driver implementations.
//!
//! The transaction core itself never raises these: every controller-facing
//! failure travels as a `{succeeded: false, message}` envelope (see
//! [`crate::outcome::OperationResult`]). The typed errors below exist for
//! driver implementors, which build their results out of fallible I/O and
//! fold any error into a failure envelope at the trait boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::outcome::OperationResult;

/// Result type alias for driver-internal operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Errors a device driver can encounter while servicing a facade call.
#[derive(Error, Debug)]
pub enum DriverError {
    // ========================================================================
    // Configuration Transaction Errors
    // ========================================================================
    /// The candidate configuration could not be staged (unreadable file, or
    /// text rejected by the device's configuration syntax).
    #[error("Failed to stage candidate configuration: {0}")]
    Staging(String),

    /// A configuration template could not be rendered.
    #[error("Failed to render template '{template}': {message}")]
    Render {
        /// Template name or path
        template: String,
        /// Error message
        message: String,
    },

    /// The running/candidate diff could not be computed.
    #[error("Failed to compare running and candidate configuration: {0}")]
    Compare(String),

    /// The staged candidate could not be committed.
    #[error("Failed to commit candidate configuration: {0}")]
    Commit(String),

    /// The staged candidate could not be discarded.
    #[error("Failed to discard candidate configuration: {0}")]
    Discard(String),

    /// The device could not revert to the last committed configuration.
    #[error("Failed to roll back configuration: {0}")]
    Rollback(String),

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The device session is unreachable or was closed underneath the driver.
    #[error("Device connection error: {0}")]
    Connection(String),

    /// A configuration source file does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Creates a new render error.
    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            template: template.into(),
            message: message.into(),
        }
    }
}

impl<T> From<DriverError> for OperationResult<T> {
    /// Fold a typed driver error into the failure envelope handed back to
    /// the transaction controller.
    fn from(err: DriverError) -> Self {
        OperationResult::failure(err.to_string())
    }
}
