//! Wire types for the Meridian Lab API.
//!
//! These mirror the server's JSON shapes. Fields the portal does not render
//! are simply not modelled; serde ignores what it does not know.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meridian_core::{
    AuditLogId, BookingId, BookingStatus, BranchId, CustomerId, Email, LabTestId, PaymentId,
    PaymentKind, PaymentMethod, Price, TechnicianId,
};

// =============================================================================
// Pagination
// =============================================================================

/// Page envelope for list endpoints (`?page=N&per_page=M`).
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Whether a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }

    /// An empty first page; used when a list view degrades on error.
    #[must_use]
    pub const fn empty(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            per_page,
            total: 0,
        }
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login exchange. The server may send more; only the token
/// matters here.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /customers`.
#[derive(Debug, Serialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

// =============================================================================
// Bookings
// =============================================================================

/// Abbreviated customer reference embedded in other resources.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub name: String,
}

/// Abbreviated branch reference embedded in other resources.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchSummary {
    pub id: BranchId,
    pub name: String,
}

/// Abbreviated technician reference embedded in other resources.
#[derive(Debug, Clone, Deserialize)]
pub struct TechnicianSummary {
    pub id: TechnicianId,
    pub name: String,
}

/// A test line on a booking, priced by the server at booking time.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingLine {
    pub test_id: LabTestId,
    pub name: String,
    pub price: Price,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    /// Human-facing booking code, e.g. "BK-2026-00417".
    pub code: String,
    pub customer: CustomerSummary,
    pub branch: BranchSummary,
    pub status: BookingStatus,
    pub tests: Vec<BookingLine>,
    pub technician: Option<TechnicianSummary>,
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Sum of line prices, computed server-side.
    pub total: Price,
    /// Discount applied server-side (absolute amount).
    pub discount: Price,
    /// Amount due after discount.
    pub payable: Price,
    /// Amount received so far.
    pub paid: Price,
    pub created_at: DateTime<Utc>,
}

/// Filters accepted by `GET /bookings`.
///
/// `assigned_to_me` and `own` scope the list to the caller's identity; the
/// server resolves "me" from the bearer token, so the portal never maps
/// user IDs to technician or customer records itself.
#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub branch_id: Option<BranchId>,
    pub technician_id: Option<TechnicianId>,
    pub customer_id: Option<CustomerId>,
    pub search: Option<String>,
    /// Only bookings assigned to the calling technician.
    pub assigned_to_me: bool,
    /// Only the calling customer's own bookings.
    pub own: bool,
}

/// Body for `POST /bookings`.
#[derive(Debug, Serialize)]
pub struct BookingInput {
    pub customer_id: CustomerId,
    pub branch_id: BranchId,
    pub test_ids: Vec<LabTestId>,
    pub scheduled_for: Option<String>,
}

/// Body for `POST /bookings/{id}/assign`.
#[derive(Debug, Serialize)]
pub struct AssignInput {
    pub technician_id: TechnicianId,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub booking_id: BookingId,
    /// Booking code of the paid booking, denormalised for lists.
    pub booking_code: String,
    pub kind: PaymentKind,
    pub method: PaymentMethod,
    pub amount: Price,
    /// Display name of the staff member who recorded the entry.
    pub recorded_by: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /payments`.
#[derive(Debug, Serialize)]
pub struct PaymentInput {
    pub booking_id: BookingId,
    pub amount: String,
    pub method: PaymentMethod,
}

/// Body for `POST /payments/{id}/refund`.
#[derive(Debug, Serialize)]
pub struct RefundInput {
    pub amount: String,
    pub reason: Option<String>,
}

// =============================================================================
// Branches, technicians, test catalog
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /branches`.
#[derive(Debug, Serialize)]
pub struct BranchInput {
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub email: Option<Email>,
    pub branch: Option<BranchSummary>,
    pub active: bool,
}

/// Body for `POST /technicians`.
#[derive(Debug, Serialize)]
pub struct TechnicianInput {
    pub name: String,
    pub email: Option<String>,
    pub branch_id: Option<BranchId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabTest {
    pub id: LabTestId,
    /// Catalog code, e.g. "CBC" or "LFT".
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Price,
    pub active: bool,
}

/// Body for `POST /tests`.
#[derive(Debug, Serialize)]
pub struct LabTestInput {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub price: String,
}

// =============================================================================
// Reports & audit
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRevenue {
    pub branch: String,
    pub total: Price,
}

/// `GET /reports/revenue` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueReport {
    pub total: Price,
    pub refunded: Price,
    pub net: Price,
    pub by_branch: Vec<BranchRevenue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: u64,
}

/// `GET /reports/bookings` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingsReport {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    /// Display name of the acting user.
    pub actor: String,
    /// Verb, e.g. "booking.cancel" or "payment.record".
    pub action: String,
    /// Affected entity, e.g. "booking BK-2026-00417".
    pub entity: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_has_next_page() {
        let page: Paginated<Customer> = Paginated {
            items: vec![],
            page: 1,
            per_page: 25,
            total: 26,
        };
        assert!(page.has_next_page());

        let last: Paginated<Customer> = Paginated {
            items: vec![],
            page: 2,
            per_page: 25,
            total: 26,
        };
        assert!(!last.has_next_page());
    }

    #[test]
    fn test_empty_page_has_no_next() {
        let page = Paginated::<Booking>::empty(25);
        assert!(!page.has_next_page());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_booking_deserializes_server_shape() {
        let booking: Booking = serde_json::from_str(
            r#"{
                "id": 17,
                "code": "BK-2026-00417",
                "customer": {"id": 3, "name": "Priya Shah"},
                "branch": {"id": 1, "name": "Harbour Road"},
                "status": "IN_PROGRESS",
                "tests": [{"test_id": 9, "name": "Complete Blood Count", "price": "450.00"}],
                "technician": {"id": 5, "name": "Dan Okafor"},
                "scheduled_for": "2026-08-07T09:30:00Z",
                "total": "450.00",
                "discount": "50.00",
                "payable": "400.00",
                "paid": "400.00",
                "created_at": "2026-08-06T11:02:44Z"
            }"#,
        )
        .unwrap();
        assert_eq!(booking.status, BookingStatus::InProgress);
        assert_eq!(booking.tests.len(), 1);
        assert_eq!(booking.payable.display(), "$400.00");
    }

    #[test]
    fn test_login_response_ignores_extras() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token": "tok_1", "expires_in": 86400}"#).unwrap();
        assert_eq!(resp.token, "tok_1");
    }
}
