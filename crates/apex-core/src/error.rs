//! Error types for Apex

use thiserror::Error;

/// The main error type for Apex operations
#[derive(Debug, Error)]
pub enum ApexError {
    #[error("Track error: {0}")]
    TrackError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Apex operations
pub type Result<T> = std::result::Result<T, ApexError>;

impl From<toml::de::Error> for ApexError {
    fn from(err: toml::de::Error) -> Self {
        ApexError::TomlParseError(err.to_string())
    }
}
