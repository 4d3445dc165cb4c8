//! Error types for identity verification.

use thiserror::Error;

/// Errors that can occur while verifying an identity token.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("verifier configuration error: {0}")]
    Configuration(String),
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
