//! JWT identity verification.
//!
//! Verifies ID tokens signed with HS256 (shared secret) or RS256 (public key
//! in PEM form). The `sub` claim is the user id and the optional `groups`
//! claim is a comma-separated membership list.
//!
//! For Firebase-style ID tokens, configure issuer
//! `https://securetoken.google.com/<project>` and audience `<project>`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use keywarden_core::VerifiedClaims;

use crate::error::{IdentityError, Result};
use crate::verifier::IdentityVerifier;

/// Verifies signed JWT identity tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Verifier for HS256 tokens signed with a shared secret.
    pub fn hs256(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(IdentityError::Configuration("empty HS256 secret".into()));
        }

        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        })
    }

    /// Verifier for RS256 tokens, given the signer's public key in PEM form.
    pub fn rs256_pem(pem: &[u8]) -> Result<Self> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| IdentityError::Configuration(e.to_string()))?;

        Ok(Self {
            key,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    /// Require the `iss` claim to equal `issuer`.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Require the `aud` claim to contain `audience`.
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self
    }

    /// Allowed clock skew in seconds when checking `exp`.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.validation.leeway = seconds;
        self
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        match decode::<VerifiedClaims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                let reason = match err.kind() {
                    ErrorKind::ExpiredSignature => "token expired",
                    ErrorKind::InvalidSignature => "invalid signature",
                    ErrorKind::InvalidIssuer => "invalid issuer",
                    ErrorKind::InvalidAudience => "invalid audience",
                    ErrorKind::InvalidAlgorithm => "unexpected algorithm",
                    _ => "token validation failed",
                };
                tracing::debug!(error = %err, "identity token rejected");
                Err(IdentityError::InvalidToken(reason.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &[u8] = b"test-secret-that-is-at-least-32-characters-long";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        sub: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        groups: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
        exp: u64,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn token(secret: &[u8], claims: &TestClaims<'_>) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn valid_claims<'a>() -> TestClaims<'a> {
        TestClaims {
            sub: Some("user123456"),
            groups: Some("group1234,gp4567"),
            iss: None,
            exp: now() + 3600,
        }
    }

    #[tokio::test]
    async fn test_valid_token() {
        let verifier = JwtVerifier::hs256(SECRET).unwrap();
        let claims = verifier.verify(&token(SECRET, &valid_claims())).await.unwrap();

        assert_eq!(claims.sub.as_deref(), Some("user123456"));
        assert_eq!(claims.groups.as_deref(), Some("group1234,gp4567"));
    }

    #[tokio::test]
    async fn test_token_without_subject_still_verifies() {
        // Rejecting a missing subject is the identity layer's job.
        let verifier = JwtVerifier::hs256(SECRET).unwrap();
        let claims = TestClaims {
            sub: None,
            ..valid_claims()
        };

        let verified = verifier.verify(&token(SECRET, &claims)).await.unwrap();
        assert_eq!(verified.sub, None);
    }

    #[tokio::test]
    async fn test_wrong_secret() {
        let verifier = JwtVerifier::hs256(SECRET).unwrap();
        let forged = token(b"different-secret-that-is-at-least-32-chars", &valid_claims());

        let err = verifier.verify(&forged).await.unwrap_err();
        assert!(matches!(err, IdentityError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let verifier = JwtVerifier::hs256(SECRET).unwrap();
        let claims = TestClaims {
            exp: now() - 3600,
            ..valid_claims()
        };

        assert!(verifier.verify(&token(SECRET, &claims)).await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let verifier = JwtVerifier::hs256(SECRET).unwrap();
        assert!(verifier.verify("invalid-token").await.is_err());
    }

    #[tokio::test]
    async fn test_issuer_enforced() {
        let verifier = JwtVerifier::hs256(SECRET)
            .unwrap()
            .with_issuer("https://securetoken.google.com/my-project");

        let wrong = TestClaims {
            iss: Some("https://evil.example"),
            ..valid_claims()
        };
        assert!(verifier.verify(&token(SECRET, &wrong)).await.is_err());

        let right = TestClaims {
            iss: Some("https://securetoken.google.com/my-project"),
            ..valid_claims()
        };
        assert!(verifier.verify(&token(SECRET, &right)).await.is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            JwtVerifier::hs256(b""),
            Err(IdentityError::Configuration(_))
        ));
    }

    #[test]
    fn test_bad_pem_rejected() {
        assert!(JwtVerifier::rs256_pem(b"not a pem").is_err());
    }
}
