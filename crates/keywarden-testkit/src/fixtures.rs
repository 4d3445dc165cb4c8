//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use keywarden::{Credentials, KeyService, KeyServiceConfig};
use keywarden_core::VerifiedClaims;
use keywarden_identity::memory::StaticVerifier;
use keywarden_kms::{Kms, KmsError, KmsKeyRef, LocalKms};

/// API key every fixture service requires.
pub const API_KEY: &str = "fixture-api-key";

/// A caller with no group memberships.
pub const OWNER: &str = "user123456";

/// A caller that is not [`OWNER`] and belongs to no groups.
pub const STRANGER: &str = "other";

/// A caller belonging to [`GROUP`].
pub const MEMBER: &str = "member";

/// The group [`MEMBER`] belongs to.
pub const GROUP: &str = "group1234";

/// Iteration count used by fixtures; low to keep tests fast.
pub const FIXTURE_ITERATIONS: u32 = 1000;

/// Service type built by [`TestFixture`].
pub type TestService = KeyService<Arc<LocalKms>, StaticVerifier>;

/// A service wired to an in-memory KMS and a fixed set of callers.
pub struct TestFixture {
    pub key_ref: KmsKeyRef,
    pub kms: Arc<LocalKms>,
    pub service: TestService,
}

impl TestFixture {
    /// Create a new fixture with a fresh sealing key.
    pub fn new() -> Self {
        let key_ref = fixture_key_ref();
        let kms = Arc::new(LocalKms::new().with_generated_key(key_ref.clone()));
        let service = build_service(Arc::clone(&kms), &key_ref);

        Self {
            key_ref,
            kms,
            service,
        }
    }

    /// Credentials carrying the API key and a bearer token for `user`.
    ///
    /// Tokens are the user ids themselves.
    pub fn credentials_for(&self, user: &str) -> Credentials {
        Credentials::new().with_api_key(API_KEY).with_bearer(user)
    }

    /// Credentials carrying only the API key.
    pub fn api_key_only(&self) -> Credentials {
        Credentials::new().with_api_key(API_KEY)
    }

    /// A second service sharing this fixture's KMS, such as a restarted
    /// replica.
    pub fn replica(&self) -> TestService {
        build_service(Arc::clone(&self.kms), &self.key_ref)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The key reference every fixture seals under.
pub fn fixture_key_ref() -> KmsKeyRef {
    KmsKeyRef::global("fixture-project", "fixture-ring", "fixture-key")
}

/// Verifier accepting [`OWNER`], [`STRANGER`], and [`MEMBER`].
pub fn fixture_verifier() -> StaticVerifier {
    StaticVerifier::new()
        .with_token(OWNER, VerifiedClaims::subject(OWNER))
        .with_token(STRANGER, VerifiedClaims::subject(STRANGER))
        .with_token(
            MEMBER,
            VerifiedClaims::subject(MEMBER).with_groups(format!("{},gp4567", GROUP)),
        )
}

/// Configuration matching [`fixture_key_ref`] and [`API_KEY`].
pub fn fixture_config(key_ref: &KmsKeyRef) -> KeyServiceConfig {
    KeyServiceConfig::new(key_ref.clone(), API_KEY, "fixture-password")
        .with_iterations(FIXTURE_ITERATIONS)
}

fn build_service(kms: Arc<LocalKms>, key_ref: &KmsKeyRef) -> TestService {
    KeyService::new(Arc::new(fixture_config(key_ref)), kms, fixture_verifier())
        .expect("fixture config is valid")
}

/// A KMS that fails every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingKms;

#[async_trait]
impl Kms for FailingKms {
    async fn encrypt(&self, _key_ref: &KmsKeyRef, _plaintext: &[u8]) -> keywarden_kms::Result<Vec<u8>> {
        Err(KmsError::TransportError("connection refused".into()))
    }

    async fn decrypt(&self, _key_ref: &KmsKeyRef, _ciphertext: &[u8]) -> keywarden_kms::Result<Vec<u8>> {
        Err(KmsError::TransportError("connection refused".into()))
    }
}
