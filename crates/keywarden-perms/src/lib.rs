//! # Keywarden Permissions
//!
//! Decides whether a verified caller may receive a key.
//!
//! ## Overview
//!
//! Every sealed key carries an [`OwnerTag`](keywarden_core::OwnerTag). On
//! release, the tag recovered from the decrypted payload is checked against
//! the caller's [`Identity`](keywarden_core::Identity):
//!
//! - **Personal** keys are released only to the caller whose id equals the tag
//! - **Group** keys are released to any member of the named group
//! - A **blank group** (`g:` with nothing after it) matches nobody
//!
//! The check is pure and total. It never fails; a `false` answer is turned
//! into an error by [`require`].
//!
//! ## Usage
//!
//! ```rust
//! use keywarden_core::{Identity, OwnerTag};
//! use keywarden_perms::authorize;
//!
//! let caller = Identity::new("user123456", ["group1234"]).unwrap();
//!
//! assert!(authorize(&OwnerTag::personal("user123456"), &caller));
//! assert!(authorize(&OwnerTag::group("group1234"), &caller));
//! assert!(!authorize(&OwnerTag::group(""), &caller));
//! ```

pub mod authorize;
pub mod error;

pub use authorize::{authorize, evaluate, require, Denial};
pub use error::{PermsError, Result};
