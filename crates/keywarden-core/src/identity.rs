//! Caller identities built from verified token claims.
//!
//! Claims arrive from an identity provider that has already checked the
//! token signature. This module only normalizes them: a caller must carry a
//! non-empty subject, and group memberships are a comma-separated list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Separator between group ids in the `groups` claim.
pub const GROUP_SEPARATOR: char = ',';

/// Raw claims asserted by a verified identity token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedClaims {
    /// Subject (user id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Comma-separated group memberships.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
}

impl VerifiedClaims {
    /// Claims for a subject with no groups.
    pub fn subject(sub: impl Into<String>) -> Self {
        Self {
            sub: Some(sub.into()),
            groups: None,
        }
    }

    /// Add a raw comma-separated groups claim.
    pub fn with_groups(mut self, groups: impl Into<String>) -> Self {
        self.groups = Some(groups.into());
        self
    }
}

/// A verified caller.
///
/// The id is never empty. Built once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: String,
    groups: BTreeSet<String>,
}

impl Identity {
    /// Create an identity, rejecting an empty id.
    pub fn new<I, G>(id: impl Into<String>, groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::Unauthorized("empty subject".into()));
        }

        Ok(Self {
            id,
            groups: groups
                .into_iter()
                .map(Into::into)
                .filter(|g: &String| !g.is_empty())
                .collect(),
        })
    }

    /// Normalize verified claims into an identity.
    ///
    /// Fails with [`CoreError::Unauthorized`] when the claims are absent or
    /// lack a non-empty `sub`.
    pub fn from_claims(claims: Option<&VerifiedClaims>) -> Result<Self> {
        let claims = claims.ok_or_else(|| CoreError::Unauthorized("no claims".into()))?;

        let id = match claims.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub.to_owned(),
            _ => return Err(CoreError::Unauthorized("missing subject".into())),
        };

        let groups = claims
            .groups
            .as_deref()
            .map(parse_groups)
            .unwrap_or_default();

        Ok(Self { id, groups })
    }

    /// The caller's user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The caller's group memberships.
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Whether the caller belongs to `group_id`.
    pub fn is_member_of(&self, group_id: &str) -> bool {
        self.groups.contains(group_id)
    }
}

/// Split a comma-separated group list, dropping blank segments.
fn parse_groups(raw: &str) -> BTreeSet<String> {
    raw.split(GROUP_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}
