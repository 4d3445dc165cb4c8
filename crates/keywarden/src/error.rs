//! Error types for the key service.
//!
//! Every failure falls into one of four classes. Authorization denials and
//! malformed claims both surface as [`KeyServiceError::Unauthorized`], so a
//! caller cannot tell which check failed.

use keywarden_core::CoreError;
use keywarden_identity::IdentityError;
use keywarden_kms::KmsError;
use keywarden_perms::PermsError;
use thiserror::Error;

use crate::api::{ErrorBody, ErrorResponse};
use crate::config::ConfigError;

/// Message returned for every authentication or authorization failure.
pub const UNAUTHORIZED_MESSAGE: &str = "Not authorized";

/// Message returned for internal failures.
pub const INTERNAL_MESSAGE: &str = "An internal error occurred.";

/// Message returned when the KMS fails.
pub const UPSTREAM_MESSAGE: &str = "An upstream error occurred.";

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum KeyServiceError {
    /// Bad API key, missing or unverifiable identity, malformed claims, or
    /// authorization denial. The detail stays server-side.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream failure: {0}")]
    Upstream(#[from] KmsError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<CoreError> for KeyServiceError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Unauthorized(reason) => KeyServiceError::Unauthorized(reason),
            CoreError::MalformedToken(reason) => {
                KeyServiceError::BadRequest(format!("malformed encrypted value: {}", reason))
            }
            CoreError::Randomness(_)
            | CoreError::MalformedPayload(_)
            | CoreError::InvalidDerivation(_) => KeyServiceError::Internal(e.into()),
        }
    }
}

impl From<PermsError> for KeyServiceError {
    fn from(e: PermsError) -> Self {
        KeyServiceError::Unauthorized(e.to_string())
    }
}

impl From<IdentityError> for KeyServiceError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidToken(reason) => KeyServiceError::Unauthorized(reason),
            IdentityError::Configuration(_) => KeyServiceError::Internal(e.into()),
        }
    }
}

impl KeyServiceError {
    /// HTTP-style status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            KeyServiceError::Unauthorized(_) => 401,
            KeyServiceError::BadRequest(_) => 400,
            KeyServiceError::Upstream(_) => 502,
            KeyServiceError::Config(_) | KeyServiceError::Internal(_) => 500,
        }
    }

    /// Convert to the response shown to the caller.
    ///
    /// Full detail is logged here; the caller only sees a generic message
    /// for authorization, upstream and internal failures.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            KeyServiceError::Unauthorized(reason) => {
                tracing::info!(reason = %reason, "request not authorized");
                UNAUTHORIZED_MESSAGE.to_owned()
            }
            KeyServiceError::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "bad request");
                reason.clone()
            }
            KeyServiceError::Upstream(e) => {
                tracing::error!(error = %e, "KMS request failed");
                UPSTREAM_MESSAGE.to_owned()
            }
            KeyServiceError::Config(e) => {
                tracing::error!(error = %e, "service misconfigured");
                INTERNAL_MESSAGE.to_owned()
            }
            KeyServiceError::Internal(e) => {
                tracing::error!(error = ?e, "an error occurred during a request");
                INTERNAL_MESSAGE.to_owned()
            }
        };

        ErrorResponse {
            status: self.status(),
            body: ErrorBody::failure(message),
        }
    }
}

/// Result type for key service operations.
pub type Result<T> = std::result::Result<T, KeyServiceError>;
