//! Authenticated request gateway.
//!
//! One reqwest client wraps the remote Meridian Lab API. Every outgoing
//! request passes through [`ApiClient::send`], which attaches the session's
//! bearer credential when one is supplied and sends unauthenticated
//! otherwise. The gateway never stores a credential; it reads the one handed
//! to it per call. No retries, no token refresh.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::ApiError;

/// Request timeout for all API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An opaque bearer token proving identity to the remote API.
///
/// Owned by the session service; the gateway only ever borrows one for the
/// duration of a single request.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for header construction.
    #[must_use]
    pub fn token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

/// Remote Meridian Lab API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base: Url,
}

/// Shape of the error body the API sends on non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// Create a new client for the API at `base`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(base: Url) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner { http, base }),
        }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Check that the API is reachable.
    ///
    /// Any HTTP response counts as reachable; only transport failures are
    /// errors. Used by the readiness probe and the CLI.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if no HTTP response arrives at all.
    pub async fn ping(&self) -> Result<(), ApiError> {
        self.inner
            .http
            .get(self.inner.base.clone())
            .send()
            .await?;
        Ok(())
    }

    /// GET `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the status mapping.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Option<&Credential>,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, auth, query, None::<&()>).await
    }

    /// POST a JSON `body` to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the status mapping.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Option<&Credential>,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, auth, &[], Some(body)).await
    }

    /// Dispatch one request, attaching the bearer credential if present.
    #[instrument(skip(self, auth, body), fields(method = %method, path = path))]
    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        auth: Option<&Credential>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.inner.base.join(path)?;

        let mut request = self.inner.http.request(method, url);

        if let Some(credential) = auth {
            request = request.bearer_auth(credential.token());
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            // Prefer the server's own message; fall back to the status text.
            let message = response
                .json::<ErrorBody>()
                .await
                .map_or_else(
                    |_| status.canonical_reason().unwrap_or("unknown error").to_string(),
                    |body| body.message,
                );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(Url::parse("http://localhost:5000").unwrap());
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_credential_debug_redacts_token() {
        let credential = Credential::new("tok_4f9a1cc07d");
        let debug_output = format!("{credential:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok_4f9a1cc07d"));
    }

    #[test]
    fn test_credential_token_roundtrip() {
        let credential = Credential::new("tok_4f9a1cc07d");
        assert_eq!(credential.token(), "tok_4f9a1cc07d");
    }

    #[test]
    fn test_unauthenticated_request_has_no_authorization_header() {
        // The gateway only attaches Authorization when a credential is
        // supplied; a request built without one must not carry the header.
        let client = ApiClient::new(Url::parse("http://localhost:5000").unwrap());
        let request = client
            .inner
            .http
            .get(client.inner.base.join("/bookings").unwrap())
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_bearer_header_format() {
        let client = ApiClient::new(Url::parse("http://localhost:5000").unwrap());
        let credential = Credential::new("tok_4f9a1cc07d");
        let request = client
            .inner
            .http
            .get(client.inner.base.join("/bookings").unwrap())
            .bearer_auth(credential.token())
            .build()
            .unwrap();
        let header = request.headers().get("authorization").unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer tok_4f9a1cc07d");
    }
}
