//! Strong type definitions for Keywarden.
//!
//! Key material and encrypted tokens are newtypes so a plaintext key can
//! never be passed where a ciphertext is expected, and the other way round.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};

/// URL-safe decoder that accepts tokens with or without `=` padding.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A symmetric key in its printable form (URL-safe base64, no padding).
///
/// The inner string is wiped on drop, and `Debug` never shows it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct KeyMaterial(String);

impl KeyMaterial {
    /// Encode raw key bytes into printable key material.
    pub fn from_raw(raw: &[u8]) -> Self {
        Self(URL_SAFE_NO_PAD.encode(raw))
    }

    /// Wrap an already-encoded key.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The printable key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the printable key in characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// An opaque, URL-safe token wrapping KMS ciphertext.
///
/// This is the only artifact that leaves the service. Its content is
/// `owner_tag | key`, sealed under the managed KMS key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedToken(String);

impl EncryptedToken {
    /// Encode KMS ciphertext as a URL-safe token without padding.
    pub fn from_ciphertext(ciphertext: &[u8]) -> Self {
        Self(URL_SAFE_NO_PAD.encode(ciphertext))
    }

    /// Wrap a token string as received from a caller.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the KMS ciphertext.
    ///
    /// Tokens in the standard base64 alphabet, or carrying `=` padding and a
    /// trailing newline, are accepted as well.
    pub fn ciphertext(&self) -> Result<Vec<u8>> {
        let normalized: String = self
            .0
            .trim()
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();

        if normalized.is_empty() {
            return Err(CoreError::MalformedToken("empty token".into()));
        }

        LENIENT_URL_SAFE
            .decode(normalized.as_bytes())
            .map_err(|e| CoreError::MalformedToken(e.to_string()))
    }
}

impl fmt::Debug for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedToken({} chars)", self.0.len())
    }
}

impl fmt::Display for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncryptedToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}
