//! In-process implementation of the Kms trait.
//!
//! Keys live in memory and are lost when the backend is dropped, so tokens
//! sealed by one `LocalKms` cannot be opened by another. Intended for tests
//! and local development, not production.

use std::collections::HashMap;

use async_trait::async_trait;
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{KmsError, Result};
use crate::key_ref::KmsKeyRef;
use crate::traits::Kms;

/// Format identifier for sealed blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
enum SealFormat {
    /// ChaCha20-Poly1305 with 256-bit key, key resource name as AAD.
    ChaCha20Poly1305 = 1,
}

/// Ciphertext framing produced by [`LocalKms`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SealedBlob {
    format: SealFormat,
    nonce: [u8; 12],
    ciphertext: Vec<u8>,
}

impl SealedBlob {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| KmsError::SerializationError(e.to_string()))?;
        Ok(buf)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| KmsError::SerializationError(e.to_string()))
    }
}

/// In-memory KMS backend.
#[derive(Default)]
pub struct LocalKms {
    keys: HashMap<KmsKeyRef, Zeroizing<[u8; 32]>>,
}

impl LocalKms {
    /// Create a backend with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key with explicit bytes.
    pub fn with_key(mut self, key_ref: KmsKeyRef, key: [u8; 32]) -> Self {
        self.keys.insert(key_ref, Zeroizing::new(key));
        self
    }

    /// Register a freshly generated random key.
    pub fn with_generated_key(self, key_ref: KmsKeyRef) -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        self.with_key(key_ref, key)
    }

    /// Whether a key is registered under `key_ref`.
    pub fn has_key(&self, key_ref: &KmsKeyRef) -> bool {
        self.keys.contains_key(key_ref)
    }

    fn cipher(&self, key_ref: &KmsKeyRef) -> Result<ChaCha20Poly1305> {
        let key = self
            .keys
            .get(key_ref)
            .ok_or_else(|| KmsError::KeyNotFound(key_ref.resource_name()))?;

        ChaCha20Poly1305::new_from_slice(&key[..])
            .map_err(|e| KmsError::EncryptionError(e.to_string()))
    }
}

#[async_trait]
impl Kms for LocalKms {
    async fn encrypt(&self, key_ref: &KmsKeyRef, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher(key_ref)?;
        let aad = key_ref.resource_name();

        let mut nonce = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: aad.as_bytes(),
                },
            )
            .map_err(|e| KmsError::EncryptionError(e.to_string()))?;

        SealedBlob {
            format: SealFormat::ChaCha20Poly1305,
            nonce,
            ciphertext,
        }
        .to_bytes()
    }

    async fn decrypt(&self, key_ref: &KmsKeyRef, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher(key_ref)?;
        let aad = key_ref.resource_name();
        let blob = SealedBlob::from_bytes(ciphertext)?;

        match blob.format {
            SealFormat::ChaCha20Poly1305 => cipher
                .decrypt(
                    Nonce::from_slice(&blob.nonce),
                    Payload {
                        msg: &blob.ciphertext,
                        aad: aad.as_bytes(),
                    },
                )
                .map_err(|e| {
                    tracing::debug!(key = %key_ref, "local kms rejected ciphertext");
                    KmsError::DecryptionError(e.to_string())
                }),
        }
    }
}
