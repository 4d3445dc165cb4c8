//! # Keywarden
//!
//! Issue, seal, and release small symmetric keys bound to a user or a group.
//!
//! ## Overview
//!
//! Keywarden is stateless. A key never touches storage: it is generated,
//! bound to its owner, sealed by a KMS, and handed back to the caller as an
//! opaque token. Releasing the key later means unsealing the token and
//! checking the caller against the owner recorded inside it.
//!
//! - **Personal keys** are bound to the caller's user id
//! - **Group keys** are bound to `g:<group>` and released to group members
//! - **Release** checks the caller's verified identity against the owner
//!
//! ## Request Lifecycle
//!
//! ```text
//! Unauthenticated ──(API key + identity token)──▶ Authenticated
//!        │                                           │
//!        └─(API key only)─▶ Issued (group)           ├─▶ Issued (personal)
//!                                                    ├─▶ Released
//!                                                    └─▶ Denied
//! ```
//!
//! [`KeyService::authenticate`] produces a [`CallerSession`], the
//! authenticated state. Nothing survives the request.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use keywarden::{Credentials, KeyService, KeyServiceConfig};
//! use keywarden::identity::JwtVerifier;
//! use keywarden::kms::{KmsKeyRef, LocalKms};
//!
//! async fn example() {
//!     let key_ref = KmsKeyRef::global("my-project", "my-ring", "my-key");
//!     let config = KeyServiceConfig::new(key_ref.clone(), "api-secret", "derivation-password");
//!
//!     let kms = LocalKms::new().with_generated_key(key_ref);
//!     let verifier = JwtVerifier::hs256(b"jwt-secret").unwrap();
//!     let service = KeyService::new(Arc::new(config), kms, verifier).unwrap();
//!
//!     let credentials = Credentials::new()
//!         .with_api_key("api-secret")
//!         .with_authorization("Bearer <id token>");
//!
//!     let issued = service.issue_personal_key(&credentials).await.unwrap();
//!     let released = service
//!         .release_key(&credentials, Some(issued.encrypted.as_str()))
//!         .await
//!         .unwrap();
//!     assert_eq!(issued.key, released.key);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `keywarden::core` - Identities, owner tags, key material, codec
//! - `keywarden::perms` - Authorization engine
//! - `keywarden::kms` - KMS trait and local backend
//! - `keywarden::identity` - Identity-token verification

pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod service;

// Re-export component crates
pub use keywarden_core as core;
pub use keywarden_identity as identity;
pub use keywarden_kms as kms;
pub use keywarden_perms as perms;

// Re-export main types for convenience
pub use api::{Credentials, ErrorBody, ErrorResponse, IssuedKey, ReleasedKey};
pub use config::{ConfigError, DerivationConfig, KeyServiceConfig};
pub use error::{KeyServiceError, Result};
pub use gate::ApiKeyGate;
pub use service::{CallerSession, KeyService};

pub use keywarden_core::{EncryptedToken, Identity, KeyMaterial, OwnerTag};
