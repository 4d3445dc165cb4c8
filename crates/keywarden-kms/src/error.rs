//! Error types for the KMS module.

use thiserror::Error;

/// Errors that can occur during KMS operations.
#[derive(Debug, Error)]
pub enum KmsError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("encryption error: {0}")]
    EncryptionError(String),

    #[error("decryption error: {0}")]
    DecryptionError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("transport error: {0}")]
    TransportError(String),
}

/// Result type for KMS operations.
pub type Result<T> = std::result::Result<T, KmsError>;
