//! Customer endpoints.

use meridian_core::CustomerId;
use tracing::instrument;

use super::types::{Customer, CustomerInput, Paginated};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List customers via `GET /customers`, optionally filtered by a search
    /// term (name, email, or phone - server-defined matching).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_customers(
        &self,
        auth: &Credential,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Paginated<Customer>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        self.get("/customers", Some(auth), &query).await
    }

    /// Fetch one customer via `GET /customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self, auth))]
    pub async fn get_customer(
        &self,
        auth: &Credential,
        id: CustomerId,
    ) -> Result<Customer, ApiError> {
        self.get(&format!("/customers/{id}"), Some(auth), &[]).await
    }

    /// Register a customer via `POST /customers`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the intake
    /// (e.g. duplicate email).
    #[instrument(skip(self, auth, input))]
    pub async fn create_customer(
        &self,
        auth: &Credential,
        input: &CustomerInput,
    ) -> Result<Customer, ApiError> {
        self.post("/customers", Some(auth), input).await
    }
}
