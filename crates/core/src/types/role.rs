//! Portal roles.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated identity.
///
/// The set is closed: the remote API only ever returns one of these values,
/// in SCREAMING_SNAKE_CASE wire form (`"SUPER_ADMIN"`, `"TECHNICIAN"`, ...).
/// Role checks are exact membership tests; there is no implied hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access across all branches, including branch and user management.
    SuperAdmin,
    /// Manages a single branch: staff, bookings, payments, reports.
    BranchAdmin,
    /// Front desk: customer intake, bookings, payment recording.
    Receptionist,
    /// Performs tests; sees only the assigned work queue.
    Technician,
    /// A lab customer; sees only their own bookings.
    Customer,
}

impl Role {
    /// All roles, in privilege order. Useful for exhaustive checks and the
    /// CLI's navigation preview.
    pub const ALL: [Self; 5] = [
        Self::SuperAdmin,
        Self::BranchAdmin,
        Self::Receptionist,
        Self::Technician,
        Self::Customer,
    ];

    /// The wire form of the role, as the remote API sends it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::BranchAdmin => "BRANCH_ADMIN",
            Self::Receptionist => "RECEPTIONIST",
            Self::Technician => "TECHNICIAN",
            Self::Customer => "CUSTOMER",
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::BranchAdmin => "Branch Admin",
            Self::Receptionist => "Receptionist",
            Self::Technician => "Technician",
            Self::Customer => "Customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "BRANCH_ADMIN" => Ok(Self::BranchAdmin),
            "RECEPTIONIST" => Ok(Self::Receptionist),
            "TECHNICIAN" => Ok(Self::Technician),
            "CUSTOMER" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_screaming_snake() {
        let json = serde_json::to_string(&Role::BranchAdmin).unwrap();
        assert_eq!(json, "\"BRANCH_ADMIN\"");

        let parsed: Role = serde_json::from_str("\"TECHNICIAN\"").unwrap();
        assert_eq!(parsed, Role::Technician);
    }

    #[test]
    fn test_wire_format_is_case_sensitive() {
        // Lowercase variants are not valid wire values.
        assert!(serde_json::from_str::<Role>("\"technician\"").is_err());
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
