//! Payload vectors for the sealed plaintext layout.
//!
//! Every deployment reading tokens sealed by another must split these
//! plaintexts the same way.

use keywarden_core::{decode, encode, KeyMaterial, OwnerTag};

/// A known plaintext and how it must decode.
#[derive(Debug, Clone)]
pub struct PayloadVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Decrypted plaintext as stored in a token.
    pub plaintext: &'static str,
    /// Expected owner, `None` for legacy payloads.
    pub owner: Option<OwnerTag>,
    /// Expected key after padding removal.
    pub key: &'static str,
    /// Whether [`encode`] produces exactly `plaintext`.
    pub canonical: bool,
}

/// Get all payload vectors.
pub fn all_vectors() -> Vec<PayloadVector> {
    vec![
        PayloadVector {
            name: "personal key",
            plaintext: "user123456|q3TBZ2hNc1lEY2xqU0Z1cQ",
            owner: Some(OwnerTag::personal("user123456")),
            key: "q3TBZ2hNc1lEY2xqU0Z1cQ",
            canonical: true,
        },
        PayloadVector {
            name: "group key",
            plaintext: "g:group1234|Zm9vYmFyYmF6cXV4cXV1eA",
            owner: Some(OwnerTag::group("group1234")),
            key: "Zm9vYmFyYmF6cXV4cXV1eA",
            canonical: true,
        },
        PayloadVector {
            name: "personal key with padded suffix",
            plaintext: "user123456|q3TBZ2hNc1lEY2xqU0Z1cQ==\n",
            owner: Some(OwnerTag::personal("user123456")),
            key: "q3TBZ2hNc1lEY2xqU0Z1cQ",
            canonical: false,
        },
        PayloadVector {
            name: "legacy key without owner",
            plaintext: "bGVnYWN5a2V5dmFsdWUxMg==",
            owner: None,
            key: "bGVnYWN5a2V5dmFsdWUxMg",
            canonical: false,
        },
        PayloadVector {
            name: "key containing delimiter",
            plaintext: "user123456|abc|def",
            owner: Some(OwnerTag::personal("user123456")),
            key: "abc|def",
            canonical: true,
        },
        PayloadVector {
            name: "empty owner",
            plaintext: "|Zm9vYmFyYmF6cXV4cXV1eA",
            owner: Some(OwnerTag::personal("")),
            key: "Zm9vYmFyYmF6cXV4cXV1eA",
            canonical: true,
        },
    ]
}

/// Check every vector against the codec.
///
/// Returns the name of the first vector that fails.
pub fn verify_all_vectors() -> Result<(), &'static str> {
    for vector in all_vectors() {
        let decoded = decode(vector.plaintext);
        if decoded.owner != vector.owner || decoded.key.as_str() != vector.key {
            return Err(vector.name);
        }

        if vector.canonical {
            let owner = vector.owner.as_ref().ok_or(vector.name)?;
            if encode(owner, &KeyMaterial::new(vector.key)) != vector.plaintext {
                return Err(vector.name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_verify() {
        assert_eq!(verify_all_vectors(), Ok(()));
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
