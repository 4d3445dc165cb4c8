//! Identity forwarded by a Cloud Endpoints proxy.
//!
//! When the proxy has already verified the caller's ID token, it forwards
//! the result in the `X-Endpoint-API-UserInfo` header as base64-encoded
//! JSON. The header value is presented to [`EndpointsVerifier`] as a raw
//! token; [`bearer_token`](crate::bearer_token) passes it through unchanged.
//!
//! Only deploy this behind a proxy that strips the header from client
//! requests. Nothing here is signed.

use async_trait::async_trait;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use keywarden_core::VerifiedClaims;
use serde::Deserialize;

use crate::error::{IdentityError, Result};
use crate::verifier::IdentityVerifier;

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The forwarded user-info document.
#[derive(Deserialize)]
struct UserInfo {
    #[serde(default)]
    id: Option<String>,

    /// JSON-encoded claims of the original ID token.
    #[serde(default)]
    claims: Option<String>,
}

#[derive(Deserialize)]
struct ForwardedClaims {
    #[serde(default)]
    groups: Option<String>,
}

/// Trusts identity already verified by a Cloud Endpoints proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointsVerifier;

impl EndpointsVerifier {
    /// Create a verifier.
    pub fn new() -> Self {
        Self
    }

    fn parse(header: &str) -> Result<VerifiedClaims> {
        let normalized: String = header
            .trim()
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();

        let json = LENIENT_URL_SAFE
            .decode(normalized.as_bytes())
            .map_err(|e| IdentityError::InvalidToken(format!("user info not base64: {}", e)))?;

        let info: UserInfo = serde_json::from_slice(&json)
            .map_err(|e| IdentityError::InvalidToken(format!("user info not JSON: {}", e)))?;

        let id = info
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| IdentityError::InvalidToken("user info without id".into()))?;

        let groups = info
            .claims
            .as_deref()
            .and_then(|claims| serde_json::from_str::<ForwardedClaims>(claims).ok())
            .and_then(|claims| claims.groups);

        Ok(VerifiedClaims {
            sub: Some(id),
            groups,
        })
    }
}

#[async_trait]
impl IdentityVerifier for EndpointsVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        Self::parse(token).map_err(|e| {
            tracing::debug!(error = %e, "forwarded user info rejected");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    fn header(info: serde_json::Value) -> String {
        STANDARD.encode(info.to_string())
    }

    #[tokio::test]
    async fn test_id_becomes_subject() {
        let token = header(json!({ "id": "user123456", "email": "u@example.com" }));
        let claims = EndpointsVerifier::new().verify(&token).await.unwrap();

        assert_eq!(claims.sub.as_deref(), Some("user123456"));
        assert_eq!(claims.groups, None);
    }

    #[tokio::test]
    async fn test_groups_from_forwarded_claims() {
        let forwarded = json!({ "sub": "user123456", "groups": "group1234,gp4567" }).to_string();
        let token = header(json!({ "id": "user123456", "claims": forwarded }));
        let claims = EndpointsVerifier::new().verify(&token).await.unwrap();

        assert_eq!(claims.groups.as_deref(), Some("group1234,gp4567"));
    }

    #[tokio::test]
    async fn test_url_safe_unpadded_accepted() {
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(json!({ "id": "user123456" }).to_string());
        assert!(EndpointsVerifier::new().verify(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_or_empty_id_rejected() {
        let verifier = EndpointsVerifier::new();

        for info in [json!({}), json!({ "id": "" }), json!({ "id": null })] {
            assert!(matches!(
                verifier.verify(&header(info)).await,
                Err(IdentityError::InvalidToken(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_garbage_rejected() {
        let verifier = EndpointsVerifier::new();
        assert!(verifier.verify("not*base64").await.is_err());
        assert!(verifier.verify(&STANDARD.encode("not json")).await.is_err());
    }
}
