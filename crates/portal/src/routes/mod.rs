//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to /dashboard
//! GET  /dashboard               - Role-aware landing page
//!
//! # Auth
//! GET  /signin                  - Sign-in page (guests only)
//! POST /signin                  - Credential exchange with the remote API
//! POST /logout                  - Sign out
//!
//! # Bookings (staff)
//! GET  /bookings                - Booking list with filters
//! GET  /bookings/new            - Intake form
//! POST /bookings/new            - Create booking
//! GET  /bookings/{id}           - Booking detail
//! POST /bookings/{id}/assign    - Assign technician (managers)
//! POST /bookings/{id}/cancel    - Cancel booking
//!
//! # Customers (staff)
//! GET  /customers               - Customer list
//! GET  /customers/new           - Intake form
//! POST /customers/new           - Register customer
//! GET  /customers/{id}          - Customer detail with booking history
//!
//! # Payments (staff)
//! GET  /payments                - Ledger (payments + refunds)
//! POST /payments/record         - Record a payment
//! POST /payments/{id}/refund    - Record a refund
//!
//! # Administration
//! GET/POST /branches            - Branch management (super admin)
//! GET/POST /technicians         - Technician roster (managers)
//! GET/POST /tests               - Test catalog (staff view, manager create)
//!
//! # Technician & customer views
//! GET  /worklist                - Assigned bookings (technicians)
//! POST /worklist/{id}/complete  - Mark tests complete
//! GET  /my/bookings             - The customer's own bookings
//!
//! # Reports (managers)
//! GET  /reports/revenue         - Revenue by branch over a date range
//! GET  /reports/bookings        - Booking counts by status
//!
//! # Audit (super admin)
//! GET  /audit-logs              - Audit trail
//!
//! # Errors
//! GET  /unauthorized            - Role-mismatch landing
//! *                             - Not-found page
//! ```

pub mod account;
pub mod audit;
pub mod auth;
pub mod bookings;
pub mod branches;
pub mod catalog;
pub mod customers;
pub mod dashboard;
pub mod errors;
pub mod payments;
pub mod reports;
pub mod technicians;
pub mod worklist;

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::{get, post},
};
use tower_sessions::Session;

use meridian_core::Identity;

use crate::api::{ApiError, Credential};
use crate::error::AppError;
use crate::guard::LANDING_PATH;
use crate::nav::{self, NavItemView};
use crate::state::AppState;

/// Build the portal router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(LANDING_PATH) }))
        .merge(auth::router())
        .route("/dashboard", get(dashboard::index))
        .route("/bookings", get(bookings::index))
        .route("/bookings/new", get(bookings::new_form).post(bookings::create))
        .route("/bookings/{id}", get(bookings::show))
        .route("/bookings/{id}/assign", post(bookings::assign))
        .route("/bookings/{id}/cancel", post(bookings::cancel))
        .route("/customers", get(customers::index))
        .route("/customers/new", get(customers::new_form).post(customers::create))
        .route("/customers/{id}", get(customers::show))
        .route("/payments", get(payments::index))
        .route("/payments/record", post(payments::record))
        .route("/payments/{id}/refund", post(payments::refund))
        .route("/branches", get(branches::index).post(branches::create))
        .route("/technicians", get(technicians::index).post(technicians::create))
        .route("/tests", get(catalog::index).post(catalog::create))
        .route("/worklist", get(worklist::index))
        .route("/worklist/{id}/complete", post(worklist::complete))
        .route("/my/bookings", get(account::index))
        .route("/reports/revenue", get(reports::revenue))
        .route("/reports/bookings", get(reports::bookings))
        .route("/audit-logs", get(audit::index))
        .route("/unauthorized", get(errors::unauthorized))
        .fallback(errors::not_found)
}

// =============================================================================
// Shared view plumbing
// =============================================================================

/// Signed-in user view for the page chrome.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub role: &'static str,
}

/// Context every authenticated page template carries: who is signed in,
/// the role-filtered sidebar, and the current path for active-state
/// highlighting.
#[derive(Debug)]
pub struct PageContext {
    pub user: UserView,
    pub nav: Vec<NavItemView>,
    pub current_path: String,
}

impl PageContext {
    /// Build the context for one render.
    #[must_use]
    pub fn new(identity: &Identity, current_path: &str) -> Self {
        Self {
            user: UserView {
                name: identity.name.clone(),
                role: identity.role.label(),
            },
            nav: nav::sidebar(Some(identity), current_path),
            current_path: current_path.to_string(),
        }
    }
}

/// Render a template, degrading to a plain error string if rendering fails.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// The session's credential, for authenticating domain calls.
///
/// A guarded handler without a credential means the session was emptied
/// between resolution and use; treat it like any dead token.
pub(crate) async fn require_credential(
    state: &AppState,
    session: &Session,
) -> Result<Credential, AppError> {
    state
        .sessions()
        .credential(session)
        .await
        .ok_or(AppError::Api(ApiError::Unauthorized))
}

/// Format a timestamp for table cells.
pub(crate) fn format_datetime(value: &chrono::DateTime<chrono::Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Format an optional timestamp for table cells.
pub(crate) fn format_datetime_opt(value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "—".to_string(), format_datetime)
}
