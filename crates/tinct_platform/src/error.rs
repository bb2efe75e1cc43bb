//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host toolkit cannot perform the requested effect
    #[error("Platform operation not supported: {0}")]
    Unsupported(String),

    /// Screen recreation failed
    #[error("Screen recreation failed: {0}")]
    Recreate(String),

    /// A system-bar recolor call failed
    #[error("System bar update failed: {0}")]
    SystemBar(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
