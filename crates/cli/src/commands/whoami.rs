//! Login smoke test.
//!
//! # Usage
//!
//! ```bash
//! mdx-cli whoami -e reception@meridiandx.example -p <password>
//! ```
//!
//! Performs the same login exchange the portal does (`POST /auth/login`
//! then `GET /auth/me`) and reports the resolved identity. Useful for
//! verifying an account and role without opening a browser.

use thiserror::Error;
use url::Url;

use meridian_core::Email;
use meridian_portal::api::{ApiClient, Credential};

/// Default remote API base URL, matching the portal's configuration.
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Errors that can occur during the smoke test.
#[derive(Debug, Error)]
pub enum WhoamiError {
    /// The email did not parse.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// The API base URL did not parse.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Run the smoke test.
///
/// # Errors
///
/// Returns an error for invalid inputs, a rejected login, or a failed
/// identity resolution.
pub async fn run(
    email: &str,
    password: &str,
    api_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let email =
        Email::parse(email).map_err(|_| WhoamiError::InvalidEmail(email.to_owned()))?;

    let base = api_url
        .map(str::to_owned)
        .or_else(|| std::env::var("MERIDIAN_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
    let base = Url::parse(&base).map_err(|_| WhoamiError::InvalidUrl(base.clone()))?;

    let api = ApiClient::new(base);

    tracing::info!("Logging in as {}...", email);
    let response = api.login(&email, password).await?;

    let credential = Credential::new(response.token);
    let identity = api.me(&credential).await?;

    tracing::info!(
        "Authenticated: id={}, name={:?}, role={}",
        identity.id,
        identity.name,
        identity.role
    );

    Ok(())
}
