//! Sidebar navigation model.
//!
//! The tree is static and compile-time defined; nothing in it comes from
//! server data. Each entry carries the access set permitted to see it, and
//! either navigates directly or expands a submenu - never both, which the
//! [`NavTarget`] sum type enforces.
//!
//! Expansion follows accordion rules: at most one submenu is open, and the
//! submenu owning the current path is forced open on every render. Expansion
//! is never persisted; each page load starts from "all closed, then sync to
//! the current path".

use meridian_core::{Access, Identity, Role, MANAGERS, STAFF};

/// One top-level sidebar entry.
#[derive(Debug)]
pub struct NavEntry {
    pub label: &'static str,
    /// Icon name resolved by the stylesheet.
    pub icon: &'static str,
    pub access: Access,
    pub target: NavTarget,
}

/// What clicking a top-level entry does.
#[derive(Debug)]
pub enum NavTarget {
    /// Navigate to this path.
    Page(&'static str),
    /// Expand; navigation happens through the children.
    Submenu(&'static [SubEntry]),
}

/// A child of a submenu entry.
///
/// `Access::Unrestricted` means "visible whenever the parent is"; a narrower
/// set restricts the child further.
#[derive(Debug)]
pub struct SubEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub access: Access,
}

const SUPER_ADMIN_ONLY: Access = Access::RestrictedTo(&[Role::SuperAdmin]);

/// The portal's navigation tree.
pub const NAV: &[NavEntry] = &[
    NavEntry {
        label: "Dashboard",
        icon: "home",
        access: Access::Unrestricted,
        target: NavTarget::Page("/dashboard"),
    },
    NavEntry {
        label: "Bookings",
        icon: "clipboard",
        access: Access::RestrictedTo(STAFF),
        target: NavTarget::Submenu(&[
            SubEntry {
                label: "All Bookings",
                path: "/bookings",
                access: Access::Unrestricted,
            },
            SubEntry {
                label: "New Booking",
                path: "/bookings/new",
                access: Access::Unrestricted,
            },
            SubEntry {
                label: "Payments",
                path: "/payments",
                access: Access::Unrestricted,
            },
        ]),
    },
    NavEntry {
        label: "Customers",
        icon: "users",
        access: Access::RestrictedTo(STAFF),
        target: NavTarget::Page("/customers"),
    },
    NavEntry {
        label: "Test Catalog",
        icon: "flask",
        access: Access::RestrictedTo(STAFF),
        target: NavTarget::Page("/tests"),
    },
    NavEntry {
        label: "Administration",
        icon: "settings",
        access: Access::RestrictedTo(MANAGERS),
        target: NavTarget::Submenu(&[
            SubEntry {
                label: "Technicians",
                path: "/technicians",
                access: Access::Unrestricted,
            },
            SubEntry {
                label: "Branches",
                path: "/branches",
                access: SUPER_ADMIN_ONLY,
            },
            SubEntry {
                label: "Audit Logs",
                path: "/audit-logs",
                access: SUPER_ADMIN_ONLY,
            },
        ]),
    },
    NavEntry {
        label: "Reports",
        icon: "chart",
        access: Access::RestrictedTo(MANAGERS),
        target: NavTarget::Submenu(&[
            SubEntry {
                label: "Revenue",
                path: "/reports/revenue",
                access: Access::Unrestricted,
            },
            SubEntry {
                label: "Bookings",
                path: "/reports/bookings",
                access: Access::Unrestricted,
            },
        ]),
    },
    NavEntry {
        label: "Work Queue",
        icon: "inbox",
        access: Access::RestrictedTo(&[Role::Technician]),
        target: NavTarget::Page("/worklist"),
    },
    NavEntry {
        label: "My Bookings",
        icon: "calendar",
        access: Access::RestrictedTo(&[Role::Customer]),
        target: NavTarget::Page("/my/bookings"),
    },
];

/// Indices into [`NAV`] of the entries visible to `identity`.
///
/// Anonymous visitors see nothing. Order-preserving and idempotent: the
/// result depends only on the identity's role.
#[must_use]
pub fn visible_entries(identity: Option<&Identity>) -> Vec<usize> {
    let Some(identity) = identity else {
        return Vec::new();
    };
    NAV.iter()
        .enumerate()
        .filter(|(_, entry)| entry.access.permits(identity.role))
        .map(|(index, _)| index)
        .collect()
}

/// Whether `path` is the sub-entry's path or a page beneath it.
fn covers(entry_path: &str, path: &str) -> bool {
    path == entry_path || path.strip_prefix(entry_path).is_some_and(|rest| rest.starts_with('/'))
}

/// The index of the submenu entry owning `path`, if any.
#[must_use]
pub fn parent_of(path: &str) -> Option<usize> {
    NAV.iter().position(|entry| match &entry.target {
        NavTarget::Submenu(children) => children.iter().any(|child| covers(child.path, path)),
        NavTarget::Page(_) => false,
    })
}

/// Accordion state: which submenu, if any, is open.
///
/// Indices refer to positions in [`NAV`], so the state is independent of
/// which entries a given role can see.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    open: Option<usize>,
}

impl NavState {
    /// The open submenu index, if any.
    #[must_use]
    pub const fn open(&self) -> Option<usize> {
        self.open
    }

    /// Manual click on a top-level submenu: opens it and closes any other;
    /// clicking the open one collapses it.
    pub const fn toggle(&mut self, index: usize) {
        self.open = match self.open {
            Some(open) if open == index => None,
            _ => Some(index),
        };
    }

    /// Force open the submenu owning the current path, overriding any manual
    /// collapse. Re-run on every path change.
    pub fn sync_to_path(&mut self, path: &str) {
        if let Some(index) = parent_of(path) {
            self.open = Some(index);
        }
    }
}

// =============================================================================
// Render model
// =============================================================================

/// A sidebar child link, ready for the template.
#[derive(Debug)]
pub struct NavChildView {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// A sidebar top-level item, ready for the template.
///
/// `path` is `None` for submenu items; their click action is expansion.
#[derive(Debug)]
pub struct NavItemView {
    pub label: &'static str,
    pub icon: &'static str,
    pub path: Option<&'static str>,
    pub active: bool,
    pub open: bool,
    pub children: Vec<NavChildView>,
}

/// Build the sidebar for one render: filter by role, then sync the
/// accordion to the current path.
#[must_use]
pub fn sidebar(identity: Option<&Identity>, current_path: &str) -> Vec<NavItemView> {
    let mut state = NavState::default();
    state.sync_to_path(current_path);

    let role = identity.map(|identity| identity.role);

    visible_entries(identity)
        .into_iter()
        .filter_map(|index| {
            let entry = NAV.get(index)?;
            let item = match &entry.target {
                NavTarget::Page(path) => NavItemView {
                    label: entry.label,
                    icon: entry.icon,
                    path: Some(*path),
                    active: covers(path, current_path),
                    open: false,
                    children: Vec::new(),
                },
                NavTarget::Submenu(children) => {
                    let children: Vec<NavChildView> = children
                        .iter()
                        .filter(|child| role.is_some_and(|role| child.access.permits(role)))
                        .map(|child| NavChildView {
                            label: child.label,
                            path: child.path,
                            active: covers(child.path, current_path),
                        })
                        .collect();
                    NavItemView {
                        label: entry.label,
                        icon: entry.icon,
                        path: None,
                        active: false,
                        open: state.open() == Some(index),
                        children,
                    }
                }
            };
            Some(item)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use meridian_core::UserId;

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new(1),
            name: "Test User".to_string(),
            role,
        }
    }

    fn labels(identity: Option<&Identity>) -> Vec<&'static str> {
        visible_entries(identity)
            .into_iter()
            .filter_map(|i| NAV.get(i).map(|e| e.label))
            .collect()
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        assert!(visible_entries(None).is_empty());
    }

    #[test]
    fn test_filter_is_exact_role_membership() {
        // Visibility is exactly the access filter, order preserved.
        assert_eq!(
            labels(Some(&identity(Role::Receptionist))),
            vec!["Dashboard", "Bookings", "Customers", "Test Catalog"]
        );
        assert_eq!(
            labels(Some(&identity(Role::Technician))),
            vec!["Dashboard", "Work Queue"]
        );
        assert_eq!(
            labels(Some(&identity(Role::Customer))),
            vec!["Dashboard", "My Bookings"]
        );
        assert_eq!(
            labels(Some(&identity(Role::SuperAdmin))),
            vec![
                "Dashboard",
                "Bookings",
                "Customers",
                "Test Catalog",
                "Administration",
                "Reports"
            ]
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let technician = identity(Role::Technician);
        let first = visible_entries(Some(&technician));
        let second = visible_entries(Some(&technician));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sub_entries_narrow_within_parent() {
        // Branch admins see Administration, but not its super-admin children.
        let items = sidebar(Some(&identity(Role::BranchAdmin)), "/dashboard");
        let admin = items.iter().find(|i| i.label == "Administration").unwrap();
        let child_labels: Vec<&str> = admin.children.iter().map(|c| c.label).collect();
        assert_eq!(child_labels, vec!["Technicians"]);

        let items = sidebar(Some(&identity(Role::SuperAdmin)), "/dashboard");
        let admin = items.iter().find(|i| i.label == "Administration").unwrap();
        let child_labels: Vec<&str> = admin.children.iter().map(|c| c.label).collect();
        assert_eq!(child_labels, vec!["Technicians", "Branches", "Audit Logs"]);
    }

    #[test]
    fn test_accordion_single_selection() {
        let mut state = NavState::default();
        assert_eq!(state.open(), None);

        state.toggle(1);
        assert_eq!(state.open(), Some(1));

        // Opening another submenu closes the first.
        state.toggle(4);
        assert_eq!(state.open(), Some(4));

        // Clicking the open one collapses it.
        state.toggle(4);
        assert_eq!(state.open(), None);
    }

    #[test]
    fn test_path_forces_parent_open_after_manual_collapse() {
        let mut state = NavState::default();
        state.sync_to_path("/reports/revenue");
        let reports = parent_of("/reports/revenue").unwrap();
        assert_eq!(state.open(), Some(reports));

        // Manually collapse, then re-sync on the same path: forced open again.
        state.toggle(reports);
        assert_eq!(state.open(), None);
        state.sync_to_path("/reports/revenue");
        assert_eq!(state.open(), Some(reports));
    }

    #[test]
    fn test_sync_leaves_state_alone_for_non_submenu_paths() {
        let mut state = NavState::default();
        state.toggle(1);
        state.sync_to_path("/customers");
        assert_eq!(state.open(), Some(1));
    }

    #[test]
    fn test_detail_pages_keep_parent_open() {
        // /bookings/17 lives under the Bookings submenu's /bookings child.
        assert_eq!(parent_of("/bookings/17"), parent_of("/bookings"));
        assert!(parent_of("/bookings/17").is_some());
    }

    #[test]
    fn test_sidebar_marks_active_child_and_open_parent() {
        let items = sidebar(Some(&identity(Role::SuperAdmin)), "/payments");
        let bookings = items.iter().find(|i| i.label == "Bookings").unwrap();
        assert!(bookings.open);
        let payments = bookings.children.iter().find(|c| c.label == "Payments").unwrap();
        assert!(payments.active);

        // Only one submenu is open.
        let open_count = items.iter().filter(|i| i.open).count();
        assert_eq!(open_count, 1);
    }

    #[test]
    fn test_covers_requires_segment_boundary() {
        assert!(covers("/bookings", "/bookings"));
        assert!(covers("/bookings", "/bookings/17"));
        assert!(!covers("/bookings", "/bookings-export"));
    }

    #[test]
    fn test_submenu_entries_have_no_direct_path() {
        // Enforced by the type, checked here as documentation: every entry
        // either navigates or expands, never both.
        for entry in NAV {
            match &entry.target {
                NavTarget::Page(path) => assert!(path.starts_with('/')),
                NavTarget::Submenu(children) => assert!(!children.is_empty()),
            }
        }
    }
}
