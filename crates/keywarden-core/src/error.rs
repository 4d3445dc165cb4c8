//! Error types for Keywarden Core.

use thiserror::Error;

/// Core errors that can occur while building identities or handling keys.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("randomness source failure: {0}")]
    Randomness(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid key derivation parameters: {0}")]
    InvalidDerivation(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
