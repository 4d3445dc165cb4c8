//! # Keywarden Identity
//!
//! Verification of caller identity tokens.
//!
//! The orchestrator only needs one capability: turn a bearer token into
//! verified [`VerifiedClaims`](keywarden_core::VerifiedClaims). The
//! [`IdentityVerifier`] trait is that seam. [`JwtVerifier`] checks signed
//! JWTs (HS256 or RS256), [`EndpointsVerifier`] accepts identity already
//! verified by a Cloud Endpoints proxy, and [`memory::StaticVerifier`] maps
//! fixed tokens to claims for tests.
//!
//! Normalizing claims into an [`Identity`](keywarden_core::Identity) is not
//! done here; see `keywarden_core::identity`.

pub mod endpoints;
pub mod error;
pub mod jwt;
pub mod memory;
pub mod verifier;

pub use endpoints::EndpointsVerifier;
pub use error::{IdentityError, Result};
pub use jwt::JwtVerifier;
pub use verifier::{bearer_token, IdentityVerifier};
