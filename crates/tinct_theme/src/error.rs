//! Theme engine error types

use thiserror::Error;
use tinct_platform::PlatformError;

/// Errors surfaced by the theme store and the lifecycle binder
#[derive(Error, Debug)]
pub enum ThemeError {
    /// An accessor was used before `attach` (or after `destroy`)
    #[error("theme store is not attached to a screen")]
    NotAttached,

    /// `attach` was called while a screen is already attached
    #[error("a screen is already attached")]
    AlreadyAttached,

    /// Failed to read or write the preference file
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The preference file is not valid TOML
    #[error("failed to parse preference file: {0}")]
    ParsePrefs(#[from] toml::de::Error),

    /// The preference map could not be serialized
    #[error("failed to encode preference file: {0}")]
    EncodePrefs(#[from] toml::ser::Error),

    /// A screen side effect failed
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
