//! Route guard decisions.
//!
//! Guards are pure functions from resolved session state to a decision;
//! nothing here knows about axum. The extractors in `middleware::auth`
//! translate a decision into a response, which keeps this logic testable
//! without a rendering harness. Guards never fail - every input maps to
//! render-or-redirect.

use meridian_core::Access;

use crate::session::SessionState;

/// Where anonymous visitors are sent.
pub const SIGNIN_PATH: &str = "/signin";

/// Where authenticated-but-wrong-role visitors are sent.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Default landing route for authenticated identities.
pub const LANDING_PATH: &str = "/dashboard";

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the protected view.
    Render,
    /// Navigate away instead of rendering.
    RedirectTo(&'static str),
}

/// Gate a protected view on authentication and role.
///
/// Anonymous sessions are redirected to sign-in. An authenticated identity
/// whose role is not permitted by `access` is redirected to the
/// unauthorized page. Only evaluated after session resolution completes.
#[must_use]
pub fn authorize(state: &SessionState, access: &Access) -> GuardDecision {
    match state.identity() {
        None => GuardDecision::RedirectTo(SIGNIN_PATH),
        Some(identity) => {
            if access.permits(identity.role) {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectTo(UNAUTHORIZED_PATH)
            }
        }
    }
}

/// Gate a guests-only view (sign-in page).
///
/// Any authenticated identity, regardless of role, is sent to the landing
/// route.
#[must_use]
pub fn guest_only(state: &SessionState) -> GuardDecision {
    if state.is_authenticated() {
        GuardDecision::RedirectTo(LANDING_PATH)
    } else {
        GuardDecision::Render
    }
}

#[cfg(test)]
mod tests {
    use meridian_core::{Identity, Role, UserId, MANAGERS, STAFF};

    use super::*;

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated(Identity {
            id: UserId::new(1),
            name: "Test User".to_string(),
            role,
        })
    }

    #[test]
    fn test_role_in_set_renders() {
        // A guard renders iff the identity's role is in the allowed set.
        let access = Access::RestrictedTo(STAFF);
        assert_eq!(
            authorize(&authenticated(Role::Receptionist), &access),
            GuardDecision::Render
        );
        assert_eq!(
            authorize(&authenticated(Role::SuperAdmin), &access),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_role_outside_set_redirects_to_unauthorized() {
        let access = Access::RestrictedTo(STAFF);
        assert_eq!(
            authorize(&authenticated(Role::Technician), &access),
            GuardDecision::RedirectTo(UNAUTHORIZED_PATH)
        );
        assert_eq!(
            authorize(&authenticated(Role::Customer), &access),
            GuardDecision::RedirectTo(UNAUTHORIZED_PATH)
        );
    }

    #[test]
    fn test_unrestricted_renders_for_every_role() {
        for role in Role::ALL {
            assert_eq!(
                authorize(&authenticated(role), &Access::Unrestricted),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn test_anonymous_always_redirects_to_signin() {
        // Regardless of how narrow or open the access set is.
        assert_eq!(
            authorize(&SessionState::Anonymous, &Access::Unrestricted),
            GuardDecision::RedirectTo(SIGNIN_PATH)
        );
        assert_eq!(
            authorize(&SessionState::Anonymous, &Access::RestrictedTo(MANAGERS)),
            GuardDecision::RedirectTo(SIGNIN_PATH)
        );
        assert_eq!(
            authorize(&SessionState::Anonymous, &Access::RestrictedTo(&[])),
            GuardDecision::RedirectTo(SIGNIN_PATH)
        );
    }

    #[test]
    fn test_guest_only_renders_for_anonymous() {
        assert_eq!(guest_only(&SessionState::Anonymous), GuardDecision::Render);
    }

    #[test]
    fn test_guest_only_redirects_every_authenticated_role_to_landing() {
        for role in Role::ALL {
            assert_eq!(
                guest_only(&authenticated(role)),
                GuardDecision::RedirectTo(LANDING_PATH)
            );
        }
    }

    #[test]
    fn test_exhaustive_role_by_set_matrix() {
        // P1: render iff role is a member of the configured set.
        let sets: [&[Role]; 4] = [
            &[Role::SuperAdmin],
            MANAGERS,
            STAFF,
            &[Role::Technician, Role::Customer],
        ];
        for set in sets {
            for role in Role::ALL {
                let expected = if set.contains(&role) {
                    GuardDecision::Render
                } else {
                    GuardDecision::RedirectTo(UNAUTHORIZED_PATH)
                };
                assert_eq!(
                    authorize(&authenticated(role), &Access::RestrictedTo(set)),
                    expected,
                    "role {role:?} against {set:?}"
                );
            }
        }
    }
}
