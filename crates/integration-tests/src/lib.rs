//! Shared helpers for portal integration tests.
//!
//! The tests in `tests/` drive a running portal (and, behind it, a running
//! Meridian Lab API) over HTTP. They are `#[ignore]`d by default; run them
//! with both services up:
//!
//! ```bash
//! PORTAL_BASE_URL=http://localhost:4000 cargo test -p meridian-integration-tests -- --ignored
//! ```
//!
//! Test accounts are configured via environment variables
//! (`TEST_STAFF_EMAIL`/`TEST_STAFF_PASSWORD`, etc.) so the suite can run
//! against any seeded environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL of the portal under test (configurable via environment).
#[must_use]
pub fn portal_base_url() -> String {
    std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// A client with a cookie store but no redirect following.
///
/// Guard behavior is asserted on the redirect responses themselves, so the
/// client must not chase them.
///
/// # Panics
///
/// Panics if the HTTP client cannot be created.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Credentials for a seeded test account, read from the environment.
#[must_use]
pub fn test_account(role_prefix: &str) -> Option<(String, String)> {
    let email = std::env::var(format!("TEST_{role_prefix}_EMAIL")).ok()?;
    let password = std::env::var(format!("TEST_{role_prefix}_PASSWORD")).ok()?;
    Some((email, password))
}

/// Sign the client's session in through the portal's form endpoint.
///
/// # Panics
///
/// Panics if the sign-in request cannot be sent or is not accepted.
pub async fn sign_in(client: &Client, email: &str, password: &str) {
    let base_url = portal_base_url();
    let resp = client
        .post(format!("{base_url}/signin"))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to post sign-in form");

    // A successful exchange redirects to the landing page.
    assert!(
        resp.status().is_redirection(),
        "sign-in was not accepted (status {})",
        resp.status()
    );
}
