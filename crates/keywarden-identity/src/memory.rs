//! A fixed-table identity verifier for testing.
//!
//! Tokens are looked up verbatim; unknown tokens are invalid.

use std::collections::HashMap;

use async_trait::async_trait;
use keywarden_core::VerifiedClaims;

use crate::error::{IdentityError, Result};
use crate::verifier::IdentityVerifier;

/// Verifier backed by an in-memory token table.
#[derive(Debug, Clone, Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, VerifiedClaims>,
}

impl StaticVerifier {
    /// Create a verifier that accepts no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as asserting `claims`.
    pub fn with_token(mut self, token: impl Into<String>, claims: VerifiedClaims) -> Self {
        self.tokens.insert(token.into(), claims);
        self
    }

    /// Number of accepted tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are accepted.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidToken("unknown token".into()))
    }
}
