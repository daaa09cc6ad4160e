//! Authentication extractors.
//!
//! Each extractor resolves the session first and only then evaluates its
//! guard - a handler body never runs, and no page is produced, before
//! resolution has completed. The guard decision itself is made by the pure
//! functions in [`crate::guard`]; this module only translates a
//! `RedirectTo` into an axum response.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use meridian_core::{Access, Identity, Role, MANAGERS, STAFF};

use crate::guard::{authorize, guest_only, GuardDecision, SIGNIN_PATH};
use crate::state::AppState;

/// Rejection carrying the guard's redirect target.
pub struct GuardRedirect(&'static str);

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Resolve the session and evaluate `access` against it.
async fn require(
    parts: &mut Parts,
    state: &AppState,
    access: &Access,
) -> Result<Identity, GuardRedirect> {
    let Some(session) = parts.extensions.get::<Session>().cloned() else {
        // No session layer means we cannot know who this is.
        return Err(GuardRedirect(SIGNIN_PATH));
    };

    let session_state = state.sessions().resolve(&session).await;
    match authorize(&session_state, access) {
        GuardDecision::Render => match session_state.identity() {
            Some(identity) => Ok(identity.clone()),
            None => Err(GuardRedirect(SIGNIN_PATH)),
        },
        GuardDecision::RedirectTo(path) => Err(GuardRedirect(path)),
    }
}

macro_rules! define_guard_extractor {
    ($(#[$doc:meta])* $name:ident, $access:expr) => {
        $(#[$doc])*
        pub struct $name(pub Identity);

        impl FromRequestParts<AppState> for $name {
            type Rejection = GuardRedirect;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                require(parts, state, &$access).await.map(Self)
            }
        }
    };
}

define_guard_extractor!(
    /// Any authenticated identity, regardless of role.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
    ///     format!("Hello, {}!", user.name)
    /// }
    /// ```
    RequireUser,
    Access::Unrestricted
);

define_guard_extractor!(
    /// Front-of-house staff: super admin, branch admin, or receptionist.
    RequireStaff,
    Access::RestrictedTo(STAFF)
);

define_guard_extractor!(
    /// Branch-level management and above.
    RequireManager,
    Access::RestrictedTo(MANAGERS)
);

define_guard_extractor!(
    /// Super admin only.
    RequireSuperAdmin,
    Access::RestrictedTo(&[Role::SuperAdmin])
);

define_guard_extractor!(
    /// Technicians only.
    RequireTechnician,
    Access::RestrictedTo(&[Role::Technician])
);

define_guard_extractor!(
    /// Customers only.
    RequireCustomer,
    Access::RestrictedTo(&[Role::Customer])
);

/// Extractor that keeps authenticated users off guest-only pages
/// (sign-in). Renders for anonymous sessions; redirects any authenticated
/// identity to the landing route.
pub struct RequireGuest;

impl FromRequestParts<AppState> for RequireGuest {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            // No session at all is as anonymous as it gets.
            return Ok(Self);
        };

        let session_state = state.sessions().resolve(&session).await;
        match guest_only(&session_state) {
            GuardDecision::Render => Ok(Self),
            GuardDecision::RedirectTo(path) => Err(GuardRedirect(path)),
        }
    }
}

/// Extractor that optionally gets the current identity.
///
/// Unlike the `Require*` extractors, this never rejects; pages like the
/// unauthorized landing use it to greet whoever is there.
pub struct OptionalUser(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>().cloned() {
            Some(session) => state
                .sessions()
                .resolve(&session)
                .await
                .identity()
                .cloned(),
            None => None,
        };
        Ok(Self(identity))
    }
}
