//! Authentication endpoints.

use meridian_core::{Email, Identity};
use tracing::instrument;

use super::types::{LoginRequest, LoginResponse};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// Exchange credentials for a bearer token via `POST /auth/login`.
    ///
    /// Sent unauthenticated; this is the only endpoint the portal calls
    /// without a credential besides the reachability probe.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the server rejects the
    /// credentials, `ApiError::Http` on transport failure.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.as_str(),
            password,
        };
        self.post("/auth/login", None, &body).await
    }

    /// Resolve the identity behind a credential via `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Any non-2xx response means "not authenticated" to the caller;
    /// `ApiError::Unauthorized` is the common case for a stale token.
    #[instrument(skip(self, auth))]
    pub async fn me(&self, auth: &Credential) -> Result<Identity, ApiError> {
        self.get("/auth/me", Some(auth), &[]).await
    }
}
