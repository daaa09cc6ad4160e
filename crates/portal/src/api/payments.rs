//! Payment and refund endpoints.
//!
//! The portal records what happened at the desk; reconciliation against the
//! booking's payable amount is entirely server-side.

use meridian_core::{PaymentId, PaymentKind};
use tracing::instrument;

use super::types::{Paginated, Payment, PaymentInput, RefundInput};
use super::{ApiClient, ApiError, Credential};

impl ApiClient {
    /// List ledger entries via `GET /payments`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on any non-2xx response or transport failure.
    #[instrument(skip(self, auth))]
    pub async fn list_payments(
        &self,
        auth: &Credential,
        page: u32,
        per_page: u32,
        kind: Option<PaymentKind>,
    ) -> Result<Paginated<Payment>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(kind) = kind {
            let value = match kind {
                PaymentKind::Payment => "PAYMENT",
                PaymentKind::Refund => "REFUND",
            };
            query.push(("kind", value.to_string()));
        }
        self.get("/payments", Some(auth), &query).await
    }

    /// Record a payment via `POST /payments`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the entry
    /// (e.g. overpayment of the booking's payable amount).
    #[instrument(skip(self, auth, input))]
    pub async fn record_payment(
        &self,
        auth: &Credential,
        input: &PaymentInput,
    ) -> Result<Payment, ApiError> {
        self.post("/payments", Some(auth), input).await
    }

    /// Record a refund against a payment via `POST /payments/{id}/refund`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the refund.
    #[instrument(skip(self, auth, input))]
    pub async fn record_refund(
        &self,
        auth: &Credential,
        id: PaymentId,
        input: &RefundInput,
    ) -> Result<Payment, ApiError> {
        self.post(&format!("/payments/{id}/refund"), Some(auth), input)
            .await
    }
}
