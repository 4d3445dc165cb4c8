//! The key service: issue, seal, and release owner-bound keys.
//!
//! The service holds no per-request state. Each call runs the API-key gate,
//! establishes the caller's identity where the operation needs one, and
//! either seals a new key or unseals and checks an existing one.

use std::sync::Arc;

use keywarden_core::{
    codec, CoreError, DecodedPayload, EncryptedToken, Identity, KeyGenerator, KeyMaterial, OwnerTag,
};
use keywarden_identity::{bearer_token, IdentityVerifier};
use keywarden_kms::Kms;
use zeroize::Zeroizing;

use crate::api::{Credentials, IssuedKey, ReleasedKey};
use crate::config::KeyServiceConfig;
use crate::error::{KeyServiceError, Result};
use crate::gate::ApiKeyGate;

/// The main service struct.
///
/// Provides:
/// - Personal key issuance for an authenticated caller
/// - Group key issuance behind the API-key gate
/// - Key release after checking the caller against the sealed owner
pub struct KeyService<K: Kms, V: IdentityVerifier> {
    /// Shared configuration.
    config: Arc<KeyServiceConfig>,
    /// API key check.
    gate: ApiKeyGate,
    /// Fresh key material. Shared with the blocking pool.
    generator: Arc<KeyGenerator>,
    /// Sealing backend.
    kms: K,
    /// Identity-token verification.
    verifier: V,
}

impl<K: Kms, V: IdentityVerifier> KeyService<K, V> {
    /// Create a service, validating the configuration.
    pub fn new(config: Arc<KeyServiceConfig>, kms: K, verifier: V) -> Result<Self> {
        config.validate()?;

        let gate = ApiKeyGate::new(config.required_api_key.clone());
        let generator = Arc::new(KeyGenerator::new(
            config.derivation.password.as_bytes(),
            config.derivation.iterations,
        )?);

        tracing::info!(key = %config.key_ref, "key service ready");

        Ok(Self {
            config,
            gate,
            generator,
            kms,
            verifier,
        })
    }

    /// The service configuration.
    pub fn config(&self) -> &KeyServiceConfig {
        &self.config
    }

    /// The KMS backend.
    pub fn kms(&self) -> &K {
        &self.kms
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a key owned by the calling user.
    pub async fn issue_personal_key(&self, credentials: &Credentials) -> Result<IssuedKey> {
        self.authenticate(credentials)
            .await?
            .issue_personal_key()
            .await
    }

    /// Issue a key owned by `group_id`.
    ///
    /// Only the API key is checked. The caller's membership of the group is
    /// not verified here; group issuance is meant for trusted back ends.
    pub async fn issue_group_key(
        &self,
        credentials: &Credentials,
        group_id: Option<&str>,
    ) -> Result<IssuedKey> {
        self.gate.check(credentials.api_key.as_deref())?;

        let group_id = group_id
            .filter(|g| !g.is_empty())
            .ok_or_else(|| KeyServiceError::BadRequest("Missing parameter \"group\"".into()))?;

        self.seal_new_key(OwnerTag::group(group_id)).await
    }

    /// Release the key sealed in `encrypted` to the caller, if they own it.
    pub async fn release_key(
        &self,
        credentials: &Credentials,
        encrypted: Option<&str>,
    ) -> Result<ReleasedKey> {
        let session = self.authenticate(credentials).await?;

        let encrypted = encrypted
            .filter(|v| !v.is_empty())
            .ok_or_else(|| KeyServiceError::BadRequest("Missing parameter \"value\"".into()))?;

        session.release_key(&EncryptedToken::new(encrypted)).await
    }

    /// Check the API key and verify the caller's identity token.
    ///
    /// A missing `Authorization` header is treated like absent claims.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<CallerSession<'_, K, V>> {
        self.gate.check(credentials.api_key.as_deref())?;

        let claims = match bearer_token(credentials.authorization.as_deref()) {
            Some(token) => Some(self.verifier.verify(token).await?),
            None => None,
        };
        let identity = Identity::from_claims(claims.as_ref())?;

        tracing::debug!(
            caller = identity.id(),
            groups = identity.groups().len(),
            "caller authenticated"
        );

        Ok(CallerSession {
            service: self,
            identity,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sealing
    // ─────────────────────────────────────────────────────────────────────────

    /// Derive a fresh key on the blocking pool.
    ///
    /// PBKDF2 at the configured iteration count is too slow to run on an
    /// executor thread.
    async fn generate_key(&self) -> Result<KeyMaterial> {
        let generator = Arc::clone(&self.generator);

        let key = tokio::task::spawn_blocking(move || generator.generate())
            .await
            .map_err(|e| anyhow::anyhow!("key generation task failed: {}", e))??;

        Ok(key)
    }

    /// Generate a key, bind it to `owner`, and seal it.
    async fn seal_new_key(&self, owner: OwnerTag) -> Result<IssuedKey> {
        let key = self.generate_key().await?;
        let plaintext = Zeroizing::new(codec::encode(&owner, &key));

        let ciphertext = self
            .kms
            .encrypt(&self.config.key_ref, plaintext.as_bytes())
            .await?;

        tracing::debug!(owner_kind = owner.kind(), "key issued");

        Ok(IssuedKey {
            key,
            encrypted: EncryptedToken::from_ciphertext(&ciphertext),
        })
    }

    /// Unseal a token and split it into owner and key.
    async fn open_token(&self, token: &EncryptedToken) -> Result<DecodedPayload> {
        let ciphertext = token.ciphertext()?;
        let plaintext = Zeroizing::new(self.kms.decrypt(&self.config.key_ref, &ciphertext).await?);

        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| CoreError::MalformedPayload(e.to_string()))?;

        Ok(codec::decode(text))
    }
}

/// An authenticated caller within a single request.
///
/// Obtained from [`KeyService::authenticate`]. Dropped with the request.
pub struct CallerSession<'s, K: Kms, V: IdentityVerifier> {
    service: &'s KeyService<K, V>,
    identity: Identity,
}

impl<'s, K: Kms, V: IdentityVerifier> CallerSession<'s, K, V> {
    /// The verified caller.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Issue a key owned by this caller.
    pub async fn issue_personal_key(&self) -> Result<IssuedKey> {
        self.service
            .seal_new_key(OwnerTag::personal(self.identity.id()))
            .await
    }

    /// Unseal `token` and release its key if this caller owns it.
    ///
    /// Legacy tokens without an owner tag are released without a check.
    pub async fn release_key(&self, token: &EncryptedToken) -> Result<ReleasedKey> {
        let payload = self.service.open_token(token).await?;

        match &payload.owner {
            Some(owner) => {
                keywarden_perms::require(owner, &self.identity)?;
                tracing::debug!(owner_kind = owner.kind(), "key released");
            }
            None => {
                tracing::debug!(caller = self.identity.id(), "legacy key released");
            }
        }

        Ok(ReleasedKey { key: payload.key })
    }
}
