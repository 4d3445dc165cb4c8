//! Ownership codec.
//!
//! The plaintext sealed by the KMS binds a key to its owner:
//!
//! ```text
//! owner_tag | key
//! ```
//!
//! An owner tag is either a bare user id (personal key) or `g:` followed by
//! a group id (group key). The delimiter is not escaped; an owner id
//! containing `|` cannot round-trip, and decoding always performs a fixed
//! two-field split on the first delimiter.
//!
//! Payloads with no delimiter at all are legacy keys with no owner.

use std::fmt;

use crate::types::KeyMaterial;

/// Separator between the owner tag and the key.
pub const DELIMITER: char = '|';

/// Prefix marking a group owner tag.
pub const GROUP_PREFIX: &str = "g:";

/// The owner a key is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerTag {
    /// A key owned by a single user.
    Personal(String),

    /// A key owned by every member of a group.
    ///
    /// The group id may be empty (a blank group), which no caller matches.
    Group(String),
}

impl OwnerTag {
    /// Parse a raw owner tag using the `g:` prefix convention.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(GROUP_PREFIX) {
            Some(group_id) => OwnerTag::Group(group_id.to_owned()),
            None => OwnerTag::Personal(raw.to_owned()),
        }
    }

    /// Tag for a personal key.
    pub fn personal(user_id: impl Into<String>) -> Self {
        OwnerTag::Personal(user_id.into())
    }

    /// Tag for a group key.
    pub fn group(group_id: impl Into<String>) -> Self {
        OwnerTag::Group(group_id.into())
    }

    /// The group id, if this is a group tag.
    pub fn group_id(&self) -> Option<&str> {
        match self {
            OwnerTag::Group(group_id) => Some(group_id),
            OwnerTag::Personal(_) => None,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OwnerTag::Personal(_) => "personal",
            OwnerTag::Group(_) => "group",
        }
    }
}

impl fmt::Display for OwnerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerTag::Personal(user_id) => f.write_str(user_id),
            OwnerTag::Group(group_id) => write!(f, "{}{}", GROUP_PREFIX, group_id),
        }
    }
}

/// A decrypted payload split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// The owner, or `None` for a legacy payload with no delimiter.
    pub owner: Option<OwnerTag>,

    /// The key, with trailing padding artifacts removed.
    pub key: KeyMaterial,
}

/// Build the plaintext for a key bound to `owner`.
pub fn encode(owner: &OwnerTag, key: &KeyMaterial) -> String {
    let mut plaintext = owner.to_string();
    plaintext.push(DELIMITER);
    plaintext.push_str(key.as_str());
    plaintext
}

/// Split a decrypted plaintext into owner and key.
pub fn decode(plaintext: &str) -> DecodedPayload {
    match plaintext.split_once(DELIMITER) {
        Some((owner, key)) => DecodedPayload {
            owner: Some(OwnerTag::parse(owner)),
            key: KeyMaterial::new(strip_padding(key)),
        },
        None => DecodedPayload {
            owner: None,
            key: KeyMaterial::new(strip_padding(plaintext)),
        },
    }
}

/// Remove one or two trailing `=` characters, optionally followed by a newline.
///
/// Anything else is returned unchanged.
fn strip_padding(segment: &str) -> &str {
    let body = segment.strip_suffix('\n').unwrap_or(segment);
    body.strip_suffix("==")
        .or_else(|| body.strip_suffix('='))
        .unwrap_or(segment)
}
