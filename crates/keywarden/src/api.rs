//! Request and response shapes.
//!
//! These mirror what an HTTP front end exchanges with callers: the API key
//! and `Authorization` header come in as [`Credentials`], and results go out
//! as JSON-serializable bodies.

use std::fmt;

use keywarden_core::{EncryptedToken, KeyMaterial};
use serde::{Deserialize, Serialize};

/// What the caller presented with a request.
#[derive(Clone, Default)]
pub struct Credentials {
    /// The `key` request parameter.
    pub api_key: Option<String>,

    /// The raw `Authorization` header.
    pub authorization: Option<String>,
}

impl Credentials {
    /// Empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the raw `Authorization` header.
    pub fn with_authorization(mut self, header: impl Into<String>) -> Self {
        self.authorization = Some(header.into());
        self
    }

    /// Set the `Authorization` header to `Bearer <token>`.
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_authorization(format!("Bearer {}", token))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// A newly issued key and its sealed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedKey {
    /// The plaintext key, for the caller's immediate use.
    pub key: KeyMaterial,

    /// The sealed token to store and present later for release.
    pub encrypted: EncryptedToken,
}

/// A key released from a sealed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasedKey {
    /// The plaintext key.
    pub key: KeyMaterial,
}

/// JSON body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,

    /// Caller-safe message.
    pub error: String,
}

impl ErrorBody {
    /// A failure body with `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// A failed request: status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP-style status code.
    pub status: u16,

    /// Response body.
    pub body: ErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issued_key_shape() {
        let issued = IssuedKey {
            key: KeyMaterial::new("k3y"),
            encrypted: EncryptedToken::new("c1pher"),
        };

        assert_eq!(
            serde_json::to_value(&issued).unwrap(),
            json!({ "key": "k3y", "encrypted": "c1pher" })
        );
    }

    #[test]
    fn test_released_key_shape() {
        let released = ReleasedKey {
            key: KeyMaterial::new("k3y"),
        };
        assert_eq!(serde_json::to_value(&released).unwrap(), json!({ "key": "k3y" }));
    }

    #[test]
    fn test_error_body_shape() {
        assert_eq!(
            serde_json::to_value(ErrorBody::failure("Not authorized")).unwrap(),
            json!({ "success": false, "error": "Not authorized" })
        );
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new()
            .with_api_key("api-secret")
            .with_bearer("token-secret");
        let debug = format!("{:?}", creds);

        assert!(!debug.contains("api-secret"));
        assert!(!debug.contains("token-secret"));
        assert_eq!(creds.authorization.as_deref(), Some("Bearer token-secret"));
    }
}
