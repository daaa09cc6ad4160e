//! Navigation preview.
//!
//! # Usage
//!
//! ```bash
//! mdx-cli nav
//! mdx-cli nav --role TECHNICIAN
//! ```
//!
//! Prints the sidebar entries each role can see, using the same filter the
//! portal applies at render time. Handy when adjusting role sets.

use thiserror::Error;

use meridian_core::{Identity, Role, UserId};
use meridian_portal::nav::{visible_entries, NavTarget, NAV};

/// Errors that can occur during the preview.
#[derive(Debug, Error)]
pub enum NavError {
    /// The role argument was not a known wire value.
    #[error("Invalid role: {0}. Valid roles: SUPER_ADMIN, BRANCH_ADMIN, RECEPTIONIST, TECHNICIAN, CUSTOMER")]
    InvalidRole(String),
}

/// Run the preview.
///
/// # Errors
///
/// Returns `NavError::InvalidRole` for an unknown `--role` value.
pub fn run(role: Option<&str>) -> Result<(), NavError> {
    let roles: Vec<Role> = match role {
        Some(raw) => vec![
            raw.parse()
                .map_err(|_| NavError::InvalidRole(raw.to_owned()))?,
        ],
        None => Role::ALL.to_vec(),
    };

    for role in roles {
        let identity = Identity {
            id: UserId::new(0),
            name: "preview".to_owned(),
            role,
        };

        tracing::info!("{} sees:", role);
        for index in visible_entries(Some(&identity)) {
            let Some(entry) = NAV.get(index) else { continue };
            match &entry.target {
                NavTarget::Page(path) => {
                    tracing::info!("  {} -> {}", entry.label, path);
                }
                NavTarget::Submenu(children) => {
                    tracing::info!("  {}:", entry.label);
                    for child in *children {
                        if child.access.permits(role) {
                            tracing::info!("    {} -> {}", child.label, child.path);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
