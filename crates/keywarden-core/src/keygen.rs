//! Random key generation.
//!
//! Every key is derived with PBKDF2-HMAC-SHA1 from a configured password and
//! a fresh 16-byte salt drawn from the operating system RNG. The 16-byte
//! output is encoded as URL-safe base64 without padding, which is always 22
//! characters long.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::error::{CoreError, Result};
use crate::types::KeyMaterial;

/// Length of a raw key in bytes.
pub const KEY_LEN: usize = 16;

/// Length of the per-key salt in bytes.
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 20_000;

/// Generates fresh key material.
#[derive(Clone)]
pub struct KeyGenerator {
    password: Zeroizing<Vec<u8>>,
    iterations: u32,
}

impl KeyGenerator {
    /// Create a generator with the given derivation password and iteration count.
    pub fn new(password: impl AsRef<[u8]>, iterations: u32) -> Result<Self> {
        if password.as_ref().is_empty() {
            return Err(CoreError::InvalidDerivation("empty password".into()));
        }
        if iterations == 0 {
            return Err(CoreError::InvalidDerivation("zero iterations".into()));
        }

        Ok(Self {
            password: Zeroizing::new(password.as_ref().to_vec()),
            iterations,
        })
    }

    /// The configured iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Generate a new key.
    ///
    /// A failing randomness source is reported as [`CoreError::Randomness`];
    /// there is no fallback.
    pub fn generate(&self) -> Result<KeyMaterial> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| CoreError::Randomness(e.to_string()))?;

        let mut raw = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2::pbkdf2_hmac::<Sha1>(&self.password, &salt, self.iterations, &mut raw[..]);

        Ok(KeyMaterial::from_raw(&raw[..]))
    }
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("password", &"<redacted>")
            .field("iterations", &self.iterations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> KeyGenerator {
        KeyGenerator::new(b"test-derivation-password", DEFAULT_ITERATIONS).unwrap()
    }

    #[test]
    fn test_key_is_22_chars() {
        let key = generator().generate().unwrap();
        assert_eq!(key.len(), 22);
    }

    #[test]
    fn test_consecutive_keys_differ() {
        let generator = generator();
        let key1 = generator.generate().unwrap();
        let key2 = generator.generate().unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_is_url_safe() {
        let generator = KeyGenerator::new(b"pw", 1).unwrap();
        for _ in 0..64 {
            let key = generator.generate().unwrap();
            assert!(key
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(KeyGenerator::new(b"", DEFAULT_ITERATIONS).is_err());
        assert!(KeyGenerator::new(b"pw", 0).is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", generator());
        assert!(!debug.contains("test-derivation-password"));
    }
}
