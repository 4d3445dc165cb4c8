//! Error types for the permissions module.

use thiserror::Error;

use crate::authorize::Denial;

/// Errors that can occur during permission checks.
#[derive(Debug, Error)]
pub enum PermsError {
    #[error("permission denied: {0}")]
    PermissionDenied(Denial),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
