//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::PortalConfig;
use crate::session::SessionService;

/// Application state shared across all handlers.
///
/// The session service and API gateway are constructed once here; handlers
/// reach both through this state rather than any ambient global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    api: ApiClient,
    sessions: SessionService,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        let api = ApiClient::new(config.api.base_url.clone());
        let sessions = SessionService::new(api.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                sessions,
            }),
        }
    }

    /// Portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// The remote API gateway.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The session lifecycle service.
    #[must_use]
    pub fn sessions(&self) -> &SessionService {
        &self.inner.sessions
    }
}
