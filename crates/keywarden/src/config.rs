//! Service configuration.
//!
//! Built once at process start and shared with the service by reference.

use std::fmt;

use keywarden_core::DEFAULT_ITERATIONS;
use keywarden_kms::KmsKeyRef;
use serde::Deserialize;
use thiserror::Error;

/// Errors in a [`KeyServiceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key configured; every request would be accepted or none.
    #[error("required API key is empty")]
    MissingApiKey,

    #[error("key derivation password is empty")]
    MissingPassword,

    #[error("key derivation iterations must be positive")]
    ZeroIterations,

    #[error("incomplete KMS key reference, missing: {0}")]
    IncompleteKeyRef(String),
}

/// Key-derivation settings.
#[derive(Clone, Deserialize)]
pub struct DerivationConfig {
    /// PBKDF2 password mixed with a fresh salt for every key.
    pub password: String,

    /// PBKDF2 iteration count.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl fmt::Debug for DerivationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationConfig")
            .field("password", &"<redacted>")
            .field("iterations", &self.iterations)
            .finish()
    }
}

/// Configuration for the [`KeyService`](crate::KeyService).
#[derive(Clone, Deserialize)]
pub struct KeyServiceConfig {
    /// The managed KMS key every token is sealed under.
    pub key_ref: KmsKeyRef,

    /// Shared secret callers must present before anything else runs.
    pub required_api_key: String,

    /// Key-derivation settings.
    pub derivation: DerivationConfig,
}

impl KeyServiceConfig {
    /// Create a configuration with the default iteration count.
    pub fn new(
        key_ref: KmsKeyRef,
        required_api_key: impl Into<String>,
        derivation_password: impl Into<String>,
    ) -> Self {
        Self {
            key_ref,
            required_api_key: required_api_key.into(),
            derivation: DerivationConfig {
                password: derivation_password.into(),
                iterations: DEFAULT_ITERATIONS,
            },
        }
    }

    /// Override the PBKDF2 iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.derivation.iterations = iterations;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.derivation.password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        if self.derivation.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        let missing = self.key_ref.missing_parts();
        if !missing.is_empty() {
            return Err(ConfigError::IncompleteKeyRef(missing.join(", ")));
        }

        Ok(())
    }
}

impl fmt::Debug for KeyServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyServiceConfig")
            .field("key_ref", &self.key_ref.resource_name())
            .field("required_api_key", &"<redacted>")
            .field("derivation", &self.derivation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_ref() -> KmsKeyRef {
        KmsKeyRef::global("project", "ring", "key")
    }

    #[test]
    fn test_valid_config() {
        let config = KeyServiceConfig::new(key_ref(), "api-key", "password");
        assert!(config.validate().is_ok());
        assert_eq!(config.derivation.iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_rejects_empty_secrets() {
        assert!(matches!(
            KeyServiceConfig::new(key_ref(), "", "password").validate(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            KeyServiceConfig::new(key_ref(), "api-key", "").validate(),
            Err(ConfigError::MissingPassword)
        ));
        assert!(matches!(
            KeyServiceConfig::new(key_ref(), "api-key", "pw")
                .with_iterations(0)
                .validate(),
            Err(ConfigError::ZeroIterations)
        ));
    }

    #[test]
    fn test_rejects_incomplete_key_ref() {
        let config = KeyServiceConfig::new(KmsKeyRef::global("", "ring", ""), "k", "pw");
        match config.validate() {
            Err(ConfigError::IncompleteKeyRef(missing)) => {
                assert_eq!(missing, "project, crypto_key");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "key_ref": {"project": "p", "key_ring": "r", "crypto_key": "k"},
            "required_api_key": "secret",
            "derivation": {"password": "pw"}
        }"#;

        let config: KeyServiceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.key_ref.resource_name(),
            "projects/p/locations/global/keyRings/r/cryptoKeys/k"
        );
        assert_eq!(config.derivation.iterations, DEFAULT_ITERATIONS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = KeyServiceConfig::new(key_ref(), "api-secret-value", "pw-secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("api-secret-value"));
        assert!(!debug.contains("pw-secret-value"));
    }
}
