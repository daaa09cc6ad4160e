//! Branch endpoints.

use tracing::instrument;

use super::types::{Branch, BranchInput};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List all branches via `GET /branches`.
    ///
    /// The branch list is small and unpaged; it also feeds the branch
    /// dropdown on the booking intake form.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_branches(&self, auth: &Credential) -> Result<Vec<Branch>, ApiError> {
        self.get("/branches", Some(auth), &[]).await
    }

    /// Open a branch via `POST /branches`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the input.
    #[instrument(skip(self, auth, input))]
    pub async fn create_branch(
        &self,
        auth: &Credential,
        input: &BranchInput,
    ) -> Result<Branch, ApiError> {
        self.post("/branches", Some(auth), input).await
    }
}
