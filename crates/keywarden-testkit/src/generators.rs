//! Proptest generators for property-based testing.

use proptest::prelude::*;

use keywarden_core::{Identity, KeyMaterial, OwnerTag};

/// Generate a user id. Never contains the payload delimiter.
pub fn user_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,15}".prop_map(String::from)
}

/// Generate a group id. Never contains the payload delimiter or a comma.
pub fn group_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,11}".prop_map(String::from)
}

/// Generate a personal or group owner tag.
pub fn owner_tag() -> impl Strategy<Value = OwnerTag> {
    prop_oneof![
        user_id().prop_map(OwnerTag::personal),
        group_id().prop_map(OwnerTag::group),
    ]
}

/// Generate key material shaped like a generated key.
pub fn key_material() -> impl Strategy<Value = KeyMaterial> {
    any::<[u8; 16]>().prop_map(|raw| KeyMaterial::from_raw(&raw))
}

/// Generate an identity with up to four groups.
pub fn identity() -> impl Strategy<Value = Identity> {
    (user_id(), prop::collection::vec(group_id(), 0..4)).prop_map(|(id, groups)| {
        Identity::new(id, groups).expect("generated ids are non-empty")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keywarden_core::{decode, encode, GROUP_PREFIX};

    proptest! {
        #[test]
        fn test_decode_inverts_encode(owner in owner_tag(), key in key_material()) {
            let decoded = decode(&encode(&owner, &key));

            prop_assert_eq!(decoded.owner, Some(owner));
            prop_assert_eq!(decoded.key, key);
        }

        #[test]
        fn test_generated_keys_are_url_safe(key in key_material()) {
            prop_assert_eq!(key.len(), 22);
            prop_assert!(key
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }

        #[test]
        fn test_owner_is_authorized_for_own_key(identity in identity()) {
            let owner = OwnerTag::personal(identity.id());
            prop_assert!(keywarden_perms::authorize(&owner, &identity));
        }

        #[test]
        fn test_members_are_authorized_for_group_keys(identity in identity()) {
            for group in identity.groups() {
                prop_assert!(keywarden_perms::authorize(&OwnerTag::group(group.clone()), &identity));
            }
        }

        #[test]
        fn test_group_prefixed_user_is_not_treated_as_personal(id in group_id(), identity in identity()) {
            let tag = OwnerTag::parse(&format!("{}{}", GROUP_PREFIX, id));
            prop_assert_eq!(tag.group_id(), Some(id.as_str()));
            prop_assert_eq!(
                keywarden_perms::authorize(&tag, &identity),
                identity.is_member_of(&id)
            );
        }
    }
}
