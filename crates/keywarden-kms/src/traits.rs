//! Kms trait: the abstract interface to a key management service.

use async_trait::async_trait;

use crate::error::Result;
use crate::key_ref::KmsKeyRef;

/// Envelope encryption under a managed key.
///
/// # Design Notes
///
/// - **Opaque ciphertext**: callers never inspect ciphertext; it is only
///   handed back to `decrypt` under the same key reference.
/// - **Integrity**: `decrypt` must fail on tampered or foreign ciphertext.
/// - **No retries**: implementations report failures as they happen; retry
///   policy, if any, lives in the transport behind the implementation.
#[async_trait]
pub trait Kms: Send + Sync {
    /// Encrypt `plaintext` under `key_ref`.
    async fn encrypt(&self, key_ref: &KmsKeyRef, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt ciphertext produced by [`Kms::encrypt`] under the same key.
    async fn decrypt(&self, key_ref: &KmsKeyRef, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

#[async_trait]
impl<K: Kms + ?Sized> Kms for std::sync::Arc<K> {
    async fn encrypt(&self, key_ref: &KmsKeyRef, plaintext: &[u8]) -> Result<Vec<u8>> {
        (**self).encrypt(key_ref, plaintext).await
    }

    async fn decrypt(&self, key_ref: &KmsKeyRef, ciphertext: &[u8]) -> Result<Vec<u8>> {
        (**self).decrypt(key_ref, ciphertext).await
    }
}
