//! Shared-secret API key gate.
//!
//! Every request must present the configured API key before any other
//! work happens, including identity verification.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::error::{KeyServiceError, Result};

/// Checks the caller-supplied API key.
#[derive(Clone)]
pub struct ApiKeyGate {
    required: String,
}

impl ApiKeyGate {
    /// Create a gate for `required`.
    pub fn new(required: impl Into<String>) -> Self {
        Self {
            required: required.into(),
        }
    }

    /// Accept the request only if `supplied` equals the required key.
    pub fn check(&self, supplied: Option<&str>) -> Result<()> {
        match supplied {
            Some(key) if constant_time_compare(key, &self.required) => Ok(()),
            _ => {
                tracing::debug!(present = supplied.is_some(), "API key rejected");
                Err(KeyServiceError::Unauthorized("invalid API key".into()))
            }
        }
    }
}

impl fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKeyGate(<redacted>)")
    }
}

/// Constant-time string comparison.
///
/// Only the length may leak; the contents never short-circuit.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key() {
        let gate = ApiKeyGate::new("the-required-key");
        assert!(gate.check(Some("the-required-key")).is_ok());
    }

    #[test]
    fn test_invalid_key() {
        let gate = ApiKeyGate::new("the-required-key");
        assert!(matches!(
            gate.check(Some("I like cheese")),
            Err(KeyServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_missing_key() {
        let gate = ApiKeyGate::new("the-required-key");
        assert!(gate.check(None).is_err());
        assert!(gate.check(Some("")).is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hell", "hello"));
        assert!(!constant_time_compare("", "hello"));
    }

    #[test]
    fn test_key_differing_in_last_byte() {
        let gate = ApiKeyGate::new("the-required-key");
        assert!(gate.check(Some("the-required-kez")).is_err());
        assert!(gate.check(Some("the-required-key ")).is_err());
    }
}
