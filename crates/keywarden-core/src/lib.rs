//! # Keywarden Core
//!
//! Pure primitives for Keywarden: caller identities, owner tags, key
//! material, and the ownership codec that binds a key to its owner.
//!
//! This crate contains no I/O, no KMS access, no token verification. It is
//! pure computation over request-scoped values.
//!
//! ## Key Types
//!
//! - [`Identity`] - A verified caller: non-empty id plus group memberships
//! - [`OwnerTag`] - Who a key belongs to: a user or a group
//! - [`KeyMaterial`] - A freshly generated 16-byte key in printable form
//! - [`EncryptedToken`] - The opaque token handed back to the caller
//!
//! ## Ownership Encoding
//!
//! The plaintext sealed by the KMS is `owner_tag | key`. See [`codec`].

pub mod codec;
pub mod error;
pub mod identity;
pub mod keygen;
pub mod types;

pub use codec::{decode, encode, DecodedPayload, OwnerTag, DELIMITER, GROUP_PREFIX};
pub use error::{CoreError, Result};
pub use identity::{Identity, VerifiedClaims};
pub use keygen::{KeyGenerator, DEFAULT_ITERATIONS, KEY_LEN};
pub use types::{EncryptedToken, KeyMaterial};
