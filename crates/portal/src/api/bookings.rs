//! Booking endpoints.
//!
//! Status transitions are requests, not decisions: the server validates
//! every assign/cancel/complete against its own rules and returns the
//! updated booking or an error.

use meridian_core::BookingId;
use tracing::instrument;

use super::types::{AssignInput, Booking, BookingFilter, BookingInput, Paginated};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List bookings via `GET /bookings`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth, filter))]
    pub async fn list_bookings(
        &self,
        auth: &Credential,
        page: u32,
        per_page: u32,
        filter: &BookingFilter,
    ) -> Result<Paginated<Booking>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(branch_id) = filter.branch_id {
            query.push(("branch_id", branch_id.to_string()));
        }
        if let Some(technician_id) = filter.technician_id {
            query.push(("technician_id", technician_id.to_string()));
        }
        if let Some(customer_id) = filter.customer_id {
            query.push(("customer_id", customer_id.to_string()));
        }
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        if filter.assigned_to_me {
            query.push(("assigned_to_me", "true".to_string()));
        }
        if filter.own {
            query.push(("own", "true".to_string()));
        }
        self.get("/bookings", Some(auth), &query).await
    }

    /// Fetch one booking via `GET /bookings/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown ID.
    #[instrument(skip(self, auth))]
    pub async fn get_booking(
        &self,
        auth: &Credential,
        id: BookingId,
    ) -> Result<Booking, ApiError> {
        self.get(&format!("/bookings/{id}"), Some(auth), &[]).await
    }

    /// Create a booking via `POST /bookings`.
    ///
    /// The server prices the tests, applies any discount, and returns the
    /// complete booking.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the intake.
    #[instrument(skip(self, auth, input))]
    pub async fn create_booking(
        &self,
        auth: &Credential,
        input: &BookingInput,
    ) -> Result<Booking, ApiError> {
        self.post("/bookings", Some(auth), input).await
    }

    /// Assign a technician via `POST /bookings/{id}/assign`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the transition is not allowed.
    #[instrument(skip(self, auth))]
    pub async fn assign_booking(
        &self,
        auth: &Credential,
        id: BookingId,
        input: &AssignInput,
    ) -> Result<Booking, ApiError> {
        self.post(&format!("/bookings/{id}/assign"), Some(auth), input)
            .await
    }

    /// Cancel a booking via `POST /bookings/{id}/cancel`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the transition is not allowed.
    #[instrument(skip(self, auth))]
    pub async fn cancel_booking(
        &self,
        auth: &Credential,
        id: BookingId,
    ) -> Result<Booking, ApiError> {
        self.post(&format!("/bookings/{id}/cancel"), Some(auth), &serde_json::json!({}))
            .await
    }

    /// Mark a booking's tests complete via `POST /bookings/{id}/complete`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the transition is not allowed.
    #[instrument(skip(self, auth))]
    pub async fn complete_booking(
        &self,
        auth: &Credential,
        id: BookingId,
    ) -> Result<Booking, ApiError> {
        self.post(&format!("/bookings/{id}/complete"), Some(auth), &serde_json::json!({}))
            .await
    }
}
