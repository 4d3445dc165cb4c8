//! Owner-tag authorization.

use std::fmt;

use keywarden_core::{Identity, OwnerTag};

use crate::error::{PermsError, Result};

/// Why a caller was refused a key.
///
/// Only for server-side diagnostics. Callers see a plain authorization
/// failure whichever check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Personal key owned by a different user.
    UserMismatch,

    /// Group key with an empty group id.
    BlankGroup,

    /// Group key for a group the caller is not in.
    NotMember,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::UserMismatch => f.write_str("key belongs to another user"),
            Denial::BlankGroup => f.write_str("blank group id in key"),
            Denial::NotMember => f.write_str("caller is not a member of the key's group"),
        }
    }
}

/// Check an owner tag against a caller, reporting why on refusal.
pub fn evaluate(owner: &OwnerTag, identity: &Identity) -> std::result::Result<(), Denial> {
    match owner {
        OwnerTag::Personal(user_id) => {
            if user_id == identity.id() {
                Ok(())
            } else {
                Err(Denial::UserMismatch)
            }
        }
        OwnerTag::Group(group_id) => {
            if group_id.is_empty() {
                Err(Denial::BlankGroup)
            } else if identity.is_member_of(group_id) {
                Ok(())
            } else {
                Err(Denial::NotMember)
            }
        }
    }
}

/// Whether `identity` may receive a key tagged with `owner`.
///
/// Refusals are logged with the compared values.
pub fn authorize(owner: &OwnerTag, identity: &Identity) -> bool {
    require(owner, identity).is_ok()
}

/// Like [`authorize`], but a refusal becomes [`PermsError::PermissionDenied`].
pub fn require(owner: &OwnerTag, identity: &Identity) -> Result<()> {
    evaluate(owner, identity).map_err(|denial| {
        tracing::warn!(
            reason = %denial,
            owner = %owner,
            caller = identity.id(),
            groups = ?identity.groups(),
            "authorization failure"
        );
        PermsError::PermissionDenied(denial)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const USER_ID: &str = "user123456";
    const GROUP_ID: &str = "group1234";

    fn caller(id: &str, groups: &[&str]) -> Identity {
        Identity::new(id, groups.iter().copied()).unwrap()
    }

    #[test]
    fn test_user_authorised_for_personal_key() {
        assert!(authorize(&OwnerTag::personal(USER_ID), &caller(USER_ID, &[])));
    }

    #[test]
    fn test_user_unauthorised_for_anothers_key() {
        let other = format!("{}a", USER_ID);
        assert!(!authorize(&OwnerTag::personal(USER_ID), &caller(&other, &[])));
    }

    #[test]
    fn test_user_authorised_for_group_key() {
        assert!(authorize(
            &OwnerTag::group(GROUP_ID),
            &caller(USER_ID, &[GROUP_ID])
        ));
    }

    #[test]
    fn test_user_unauthorised_for_other_group_key() {
        assert_eq!(
            evaluate(&OwnerTag::group(GROUP_ID), &caller(USER_ID, &["gp4567"])),
            Err(Denial::NotMember)
        );
    }

    #[test]
    fn test_user_unauthorised_for_blank_group_key() {
        assert_eq!(
            evaluate(&OwnerTag::parse("g:"), &caller(USER_ID, &["gp4567"])),
            Err(Denial::BlankGroup)
        );
    }

    #[test]
    fn test_group_membership_does_not_grant_personal_keys() {
        // A user who happens to be in a group named like the owner still
        // has to match the personal id exactly.
        assert!(!authorize(
            &OwnerTag::personal(GROUP_ID),
            &caller(USER_ID, &[GROUP_ID])
        ));
    }

    #[test]
    fn test_user_id_does_not_grant_group_keys() {
        assert!(!authorize(&OwnerTag::group(USER_ID), &caller(USER_ID, &[])));
    }

    #[test]
    fn test_require_maps_denial_to_error() {
        let err = require(&OwnerTag::personal("someone"), &caller(USER_ID, &[])).unwrap_err();
        assert!(matches!(
            err,
            PermsError::PermissionDenied(Denial::UserMismatch)
        ));
        assert!(require(&OwnerTag::personal(USER_ID), &caller(USER_ID, &[])).is_ok());
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_.@-]{1,32}"
    }

    proptest! {
        #[test]
        fn owner_always_authorised_for_own_key(id in id_strategy()) {
            let identity = caller(&id, &[]);
            prop_assert!(authorize(&OwnerTag::personal(id.clone()), &identity));
        }

        #[test]
        fn different_user_never_authorised(id1 in id_strategy(), id2 in id_strategy()) {
            prop_assume!(id1 != id2);
            prop_assert!(!authorize(&OwnerTag::personal(id1), &caller(&id2, &[])));
        }

        #[test]
        fn member_always_authorised_for_group_key(
            id in id_strategy(),
            group_id in id_strategy(),
            others in prop::collection::vec(id_strategy(), 0..5),
        ) {
            let mut groups: Vec<&str> = others.iter().map(String::as_str).collect();
            groups.push(&group_id);
            let identity = caller(&id, &groups);
            prop_assert!(authorize(&OwnerTag::group(group_id.clone()), &identity));
        }

        #[test]
        fn blank_group_never_authorised(
            id in id_strategy(),
            groups in prop::collection::vec(id_strategy(), 0..5),
        ) {
            let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
            let identity = caller(&id, &groups);
            prop_assert!(!authorize(&OwnerTag::parse("g:"), &identity));
        }
    }
}
