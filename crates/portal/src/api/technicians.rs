//! Technician roster endpoints.

use tracing::instrument;

use super::types::{Technician, TechnicianInput};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List technicians via `GET /technicians`.
    ///
    /// Unpaged; the roster also feeds the assignment dropdown on booking
    /// detail pages.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_technicians(&self, auth: &Credential) -> Result<Vec<Technician>, ApiError> {
        self.get("/technicians", Some(auth), &[]).await
    }

    /// Add a technician via `POST /technicians`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the input.
    #[instrument(skip(self, auth, input))]
    pub async fn create_technician(
        &self,
        auth: &Credential,
        input: &TechnicianInput,
    ) -> Result<Technician, ApiError> {
        self.post("/technicians", Some(auth), input).await
    }
}
