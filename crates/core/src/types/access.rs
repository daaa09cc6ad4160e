//! Role-based access sets.

use crate::types::role::Role;

/// The set of roles permitted to reach a route or navigation entry.
///
/// This is deliberately a closed sum type rather than an optional role list:
/// "open to everyone signed in" is an explicit variant, never an absent
/// field. Anonymous visitors are outside the model entirely - access checks
/// apply to an authenticated identity's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated identity is allowed, regardless of role.
    Unrestricted,
    /// Only the listed roles are allowed. Membership is exact.
    RestrictedTo(&'static [Role]),
}

impl Access {
    /// Whether `role` is permitted by this access set.
    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(roles) => roles.contains(&role),
        }
    }
}

/// Staff roles: everyone who works the front of house.
pub const STAFF: &[Role] = &[Role::SuperAdmin, Role::BranchAdmin, Role::Receptionist];

/// Management roles: branch-level administration and above.
pub const MANAGERS: &[Role] = &[Role::SuperAdmin, Role::BranchAdmin];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_permits_every_role() {
        for role in Role::ALL {
            assert!(Access::Unrestricted.permits(role));
        }
    }

    #[test]
    fn test_restricted_is_exact_membership() {
        let access = Access::RestrictedTo(STAFF);
        assert!(access.permits(Role::SuperAdmin));
        assert!(access.permits(Role::BranchAdmin));
        assert!(access.permits(Role::Receptionist));
        assert!(!access.permits(Role::Technician));
        assert!(!access.permits(Role::Customer));
    }

    #[test]
    fn test_empty_set_permits_nobody() {
        let access = Access::RestrictedTo(&[]);
        for role in Role::ALL {
            assert!(!access.permits(role));
        }
    }
}
