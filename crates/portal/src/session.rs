//! Session lifecycle: the single source of truth for "who is signed in".
//!
//! The browser session (tower-sessions cookie) durably holds at most one
//! bearer credential, and alongside it a cached copy of the identity that
//! credential resolved to. [`SessionService`] owns every mutation of that
//! pair; guards and views only ever read through it.
//!
//! Resolution protocol:
//! - cached identity present -> authenticated, no network
//! - no stored credential    -> anonymous
//! - stored credential       -> `GET /auth/me`; success caches the identity,
//!   ANY failure clears both credential and identity
//!
//! A 401 from a domain endpoint mid-session does not touch this state
//! directly; the central error mapping redirects to sign-in and the dead
//! credential is cleared here on the next resolution.

use meridian_core::{Email, Identity};
use tower_sessions::Session;

use crate::api::{ApiClient, Credential};

/// Session keys for authentication state.
pub mod session_keys {
    /// Key holding the raw bearer token.
    pub const CREDENTIAL: &str = "credential";

    /// Key holding the cached resolved identity.
    pub const IDENTITY: &str = "identity";
}

/// Resolved authentication state of one browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A credential resolved to this identity.
    Authenticated(Identity),
    /// No credential, or the stored one failed resolution.
    Anonymous,
}

impl SessionState {
    /// The identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }

    /// Whether an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Outcome of a login attempt. Login never returns an error to callers;
/// failures of any kind collapse to `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token obtained, identity resolved, session populated.
    Success,
    /// Credentials rejected or the exchange failed; stored state unchanged.
    Rejected,
}

/// Authentication service scoped to the application state.
///
/// Holds no session data itself - all state lives in the per-request
/// [`Session`] this service operates on.
#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
}

impl SessionService {
    /// Create the service over the API gateway.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Resolve the session to an authentication state.
    ///
    /// Completes before any guard decision is made; extractors await this
    /// and only then evaluate access. Idempotent, and the cached-identity
    /// fast path keeps repeated resolution off the network.
    pub async fn resolve(&self, session: &Session) -> SessionState {
        if let Ok(Some(identity)) = session.get::<Identity>(session_keys::IDENTITY).await {
            return SessionState::Authenticated(identity);
        }

        let Some(token) = session
            .get::<String>(session_keys::CREDENTIAL)
            .await
            .ok()
            .flatten()
        else {
            return SessionState::Anonymous;
        };

        let credential = Credential::new(token);
        match self.api.me(&credential).await {
            Ok(identity) => {
                if let Err(e) = session.insert(session_keys::IDENTITY, &identity).await {
                    tracing::warn!("failed to cache identity in session: {e}");
                }
                SessionState::Authenticated(identity)
            }
            Err(e) => {
                // Stale or revoked token; demote to anonymous.
                tracing::debug!("session resolution failed, clearing credential: {e}");
                self.clear(session).await;
                SessionState::Anonymous
            }
        }
    }

    /// Attempt a login exchange and populate the session on success.
    ///
    /// On failure the stored state is left exactly as it was.
    pub async fn login(&self, session: &Session, email: &Email, password: &str) -> LoginOutcome {
        let response = match self.api.login(email, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::info!(email = %email, "login rejected: {e}");
                return LoginOutcome::Rejected;
            }
        };

        // Persist the credential, then resolve it into an identity. A token
        // that fails resolution is cleared again by `resolve`.
        if let Err(e) = session
            .insert(session_keys::CREDENTIAL, &response.token)
            .await
        {
            tracing::warn!("failed to persist credential: {e}");
            return LoginOutcome::Rejected;
        }

        match self.resolve(session).await {
            SessionState::Authenticated(_) => LoginOutcome::Success,
            SessionState::Anonymous => LoginOutcome::Rejected,
        }
    }

    /// Sign the session out. Always succeeds.
    pub async fn logout(&self, session: &Session) {
        self.clear(session).await;
    }

    /// The stored credential, if any, for authenticating domain calls.
    pub async fn credential(&self, session: &Session) -> Option<Credential> {
        session
            .get::<String>(session_keys::CREDENTIAL)
            .await
            .ok()
            .flatten()
            .map(Credential::new)
    }

    async fn clear(&self, session: &Session) {
        if let Err(e) = session.remove::<String>(session_keys::CREDENTIAL).await {
            tracing::warn!("failed to remove credential from session: {e}");
        }
        if let Err(e) = session.remove::<Identity>(session_keys::IDENTITY).await {
            tracing::warn!("failed to remove identity from session: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use meridian_core::{Role, UserId};
    use tower_sessions::MemoryStore;
    use url::Url;

    use super::*;

    fn service() -> SessionService {
        // Points at a closed port; tests below never touch the network.
        SessionService::new(ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap()))
    }

    fn fresh_session() -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(None, store, None)
    }

    fn identity() -> Identity {
        Identity {
            id: UserId::new(12),
            name: "Asha Naidu".to_string(),
            role: Role::Receptionist,
        }
    }

    #[tokio::test]
    async fn test_resolve_without_credential_is_anonymous() {
        let session = fresh_session();
        let state = service().resolve(&session).await;
        assert_eq!(state, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_resolve_uses_cached_identity_without_network() {
        let session = fresh_session();
        session
            .insert(session_keys::IDENTITY, &identity())
            .await
            .unwrap();

        // The API client points at a dead endpoint; this only passes if the
        // cached identity short-circuits resolution.
        let state = service().resolve(&session).await;
        assert_eq!(state, SessionState::Authenticated(identity()));
    }

    #[tokio::test]
    async fn test_resolve_clears_unresolvable_credential() {
        let session = fresh_session();
        session
            .insert(session_keys::CREDENTIAL, "tok_dead")
            .await
            .unwrap();

        let state = service().resolve(&session).await;
        assert_eq!(state, SessionState::Anonymous);

        // The failed resolution must have cleared the stored token.
        let token: Option<String> = session.get(session_keys::CREDENTIAL).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_logout_then_resolve_is_anonymous() {
        let session = fresh_session();
        session
            .insert(session_keys::CREDENTIAL, "tok_live")
            .await
            .unwrap();
        session
            .insert(session_keys::IDENTITY, &identity())
            .await
            .unwrap();

        let svc = service();
        svc.logout(&session).await;

        assert_eq!(svc.resolve(&session).await, SessionState::Anonymous);
        assert!(svc.credential(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let session = fresh_session();
        let svc = service();

        let email = Email::parse("reception@meridiandx.example").unwrap();
        let outcome = svc.login(&session, &email, "wrong-password").await;

        assert_eq!(outcome, LoginOutcome::Rejected);
        assert!(svc.credential(&session).await.is_none());
        assert_eq!(svc.resolve(&session).await, SessionState::Anonymous);
    }
}
