//! References to managed KMS keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location used when none is configured.
pub const DEFAULT_LOCATION: &str = "global";

/// Fully-qualified resource name of a managed key.
///
/// Takes the form
/// `projects/{project}/locations/{location}/keyRings/{ring}/cryptoKeys/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KmsKeyRef {
    /// Cloud project id.
    pub project: String,

    /// KMS location.
    #[serde(default = "default_location")]
    pub location: String,

    /// Key ring name.
    pub key_ring: String,

    /// Crypto key id within the ring.
    pub crypto_key: String,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_owned()
}

impl KmsKeyRef {
    /// Create a key reference.
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        key_ring: impl Into<String>,
        crypto_key: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            key_ring: key_ring.into(),
            crypto_key: crypto_key.into(),
        }
    }

    /// Create a key reference in the default `global` location.
    pub fn global(
        project: impl Into<String>,
        key_ring: impl Into<String>,
        crypto_key: impl Into<String>,
    ) -> Self {
        Self::new(project, DEFAULT_LOCATION, key_ring, crypto_key)
    }

    /// The parent location resource name.
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project, self.location)
    }

    /// The full key resource name.
    pub fn resource_name(&self) -> String {
        format!(
            "{}/keyRings/{}/cryptoKeys/{}",
            self.parent(),
            self.key_ring,
            self.crypto_key
        )
    }

    /// Names of any empty components.
    pub fn missing_parts(&self) -> Vec<&'static str> {
        [
            ("project", &self.project),
            ("location", &self.location),
            ("key_ring", &self.key_ring),
            ("crypto_key", &self.crypto_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Display for KmsKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}
