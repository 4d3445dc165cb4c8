//! # Keywarden Testkit
//!
//! Testing utilities for Keywarden.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Payload vectors**: Known plaintexts with their expected owner and key
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready-made service with known callers and a failing KMS
//!
//! ## Payload Vectors
//!
//! Payload vectors pin down the sealed plaintext layout:
//!
//! ```rust
//! use keywarden_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! for vector in all_vectors() {
//!     println!("{}: {:?}", vector.name, vector.plaintext);
//! }
//! assert!(verify_all_vectors().is_ok());
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use keywarden_testkit::generators::{owner_tag, key_material};
//!
//! proptest! {
//!     #[test]
//!     fn decode_inverts_encode(owner in owner_tag(), key in key_material()) {
//!         let decoded = keywarden_core::decode(&keywarden_core::encode(&owner, &key));
//!         prop_assert_eq!(decoded.owner, Some(owner));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use keywarden_testkit::fixtures::{TestFixture, OWNER};
//!
//! let fixture = TestFixture::new();
//! let credentials = fixture.credentials_for(OWNER);
//! assert!(credentials.authorization.is_some());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{FailingKms, TestFixture, TestService};
pub use generators::{group_id, key_material, owner_tag, user_id};
pub use vectors::{all_vectors, verify_all_vectors, PayloadVector};
