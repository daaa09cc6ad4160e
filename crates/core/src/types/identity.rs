//! The authenticated principal.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;
use crate::types::role::Role;

/// The resolved authenticated user, as returned by `GET /auth/me`.
///
/// An absent `Identity` means "not authenticated" - there is no anonymous
/// variant of this type. The portal never constructs one locally except from
/// a successful `/auth/me` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user ID on the remote API.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Permission level.
    pub role: Role,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_auth_me_shape() {
        let identity: Identity =
            serde_json::from_str(r#"{"id": 12, "name": "Asha Naidu", "role": "RECEPTIONIST"}"#)
                .unwrap();
        assert_eq!(identity.id, UserId::new(12));
        assert_eq!(identity.role, Role::Receptionist);
    }

    #[test]
    fn test_unknown_extra_fields_are_ignored() {
        // The remote API may send more than we model.
        let identity: Identity = serde_json::from_str(
            r#"{"id": 1, "name": "Root", "role": "SUPER_ADMIN", "branch_id": 4}"#,
        )
        .unwrap();
        assert_eq!(identity.role, Role::SuperAdmin);
    }
}
