//! Audit trail endpoints.

use tracing::instrument;

use super::types::{AuditLogEntry, Paginated};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List audit entries via `GET /audit-logs`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_audit_logs(
        &self,
        auth: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<AuditLogEntry>, ApiError> {
        let query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.get("/audit-logs", Some(auth), &query).await
    }
}
