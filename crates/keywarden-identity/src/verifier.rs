//! IdentityVerifier trait and bearer-token extraction.

use async_trait::async_trait;
use keywarden_core::VerifiedClaims;

use crate::error::Result;

/// Verifies a bearer token and returns the claims it asserts.
///
/// Implementations own signature checking, expiry, issuer and audience
/// rules. Anything they reject is [`IdentityError::InvalidToken`].
///
/// [`IdentityError::InvalidToken`]: crate::IdentityError::InvalidToken
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return its claims.
    async fn verify(&self, token: &str) -> Result<VerifiedClaims>;
}

#[async_trait]
impl<V: IdentityVerifier + ?Sized> IdentityVerifier for std::sync::Arc<V> {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        (**self).verify(token).await
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The token is the last space-separated segment, so both `Bearer <token>`
/// and a raw token are accepted. Returns `None` for a missing header or an
/// empty token, including a bare `Bearer `.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .trim_end_matches(['\r', '\n'])
        .rsplit(' ')
        .next()
        .filter(|token| !token.is_empty())
}
