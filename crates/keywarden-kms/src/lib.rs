//! # Keywarden KMS
//!
//! The Key Management Service boundary: encrypt and decrypt small blobs
//! under a managed key that never leaves the KMS.
//!
//! The [`Kms`] trait keeps the orchestrator backend-agnostic. A cloud KMS
//! client implements it in the host application; [`LocalKms`] is an
//! in-process backend for tests and local development.

pub mod error;
pub mod key_ref;
pub mod local;
pub mod traits;

pub use error::{KmsError, Result};
pub use key_ref::{KmsKeyRef, DEFAULT_LOCATION};
pub use local::LocalKms;
pub use traits::Kms;
