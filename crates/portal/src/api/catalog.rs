//! Test catalog endpoints.

use tracing::instrument;

use super::types::{LabTest, LabTestInput};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List catalog tests via `GET /tests`.
    ///
    /// Unpaged; the catalog also feeds the test checkboxes on the booking
    /// intake form.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_tests(
        &self,
        auth: &Credential,
        search: Option<&str>,
    ) -> Result<Vec<LabTest>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        self.get("/tests", Some(auth), &query).await
    }

    /// Add a catalog test via `POST /tests`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the input
    /// (e.g. duplicate code).
    #[instrument(skip(self, auth, input))]
    pub async fn create_test(
        &self,
        auth: &Credential,
        input: &LabTestInput,
    ) -> Result<LabTest, ApiError> {
        self.post("/tests", Some(auth), input).await
    }
}
