//! Configuration and connectivity check.
//!
//! # Usage
//!
//! ```bash
//! mdx-cli check
//! ```
//!
//! Loads the portal configuration the same way the server does (including
//! secret validation), then probes the remote API base URL. Any HTTP
//! response counts as reachable.

use meridian_portal::api::ApiClient;
use meridian_portal::config::PortalConfig;

/// Run the check.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the remote API does
/// not answer at all.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing::info!("Loading portal configuration...");
    let config = PortalConfig::from_env()?;
    tracing::info!(
        bind = %config.socket_addr(),
        api = %config.api.base_url,
        tls = config.tls.is_some(),
        "Configuration OK"
    );

    tracing::info!("Probing remote API...");
    let api = ApiClient::new(config.api.base_url.clone());
    api.ping().await?;
    tracing::info!("Remote API reachable at {}", api.base_url());

    Ok(())
}
