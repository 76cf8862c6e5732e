//! Error types for ipkit

use thiserror::Error;

/// The main error type for ipkit operations
#[derive(Debug, Error)]
pub enum IpkitError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Upload error: {0}")]
    UploadError(String),

    #[error("Mint error: {0}")]
    MintError(String),

    #[error("Collection creation error: {0}")]
    CollectionCreationError(String),

    #[error("Registration error: {0}")]
    RegistrationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for ipkit operations
pub type Result<T> = std::result::Result<T, IpkitError>;

impl From<serde_json::Error> for IpkitError {
    fn from(err: serde_json::Error) -> Self {
        IpkitError::SerializationError(err.to_string())
    }
}
