//! Booking route handlers.
//!
//! Listing, intake, and transition forms. The portal posts transition
//! requests and renders whatever the server decided; it never gates a
//! transition on its own rules.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::{BookingId, BookingStatus, LabTestId, Role, TechnicianId};

use crate::api::ApiError;
use crate::api::types::{
    AssignInput, Booking, BookingFilter, BookingInput, Branch, LabTest, Paginated, Technician,
};
use crate::components::{FilterOption, TableColumn, TableFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireManager, RequireStaff};
use crate::state::AppState;

use super::{format_datetime, format_datetime_opt, render, require_credential, PageContext};

const PER_PAGE: u32 = 25;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub page: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Booking row for the list template.
#[derive(Debug, Clone)]
pub struct BookingRowView {
    pub id: String,
    pub code: String,
    pub customer: String,
    pub branch: String,
    pub status: &'static str,
    pub scheduled_for: String,
    pub payable: String,
    pub paid: String,
}

impl From<&Booking> for BookingRowView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            code: booking.code.clone(),
            customer: booking.customer.name.clone(),
            branch: booking.branch.name.clone(),
            status: booking.status.label(),
            scheduled_for: format_datetime_opt(booking.scheduled_for.as_ref()),
            payable: booking.payable.display(),
            paid: booking.paid.display(),
        }
    }
}

/// Booking list page template.
#[derive(Template)]
#[template(path = "bookings/index.html")]
pub struct BookingsIndexTemplate {
    pub ctx: PageContext,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    pub rows: Vec<BookingRowView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

fn list_href(page: u32, status: Option<&str>, search: Option<&str>) -> String {
    let mut href = format!("/bookings?page={page}");
    if let Some(status) = status {
        href.push_str(&format!("&status={status}"));
    }
    if let Some(search) = search {
        href.push_str(&format!("&search={search}"));
    }
    href
}

fn status_filter_options() -> Vec<FilterOption> {
    BookingStatus::ALL
        .iter()
        .map(|status| FilterOption::new(status.as_str(), status.label()))
        .collect()
}

/// Booking list page handler.
///
/// GET /bookings
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<BookingListQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<BookingStatus>().ok());
    let search = query.search.as_deref().filter(|s| !s.is_empty());

    let filter = BookingFilter {
        status,
        search: search.map(str::to_string),
        ..BookingFilter::default()
    };

    let result = state
        .api()
        .list_bookings(&credential, page, PER_PAGE, &filter)
        .await;
    let listing = match result {
        Ok(listing) => listing,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch bookings: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let status_value = status.map(|s| s.as_str().to_string());
    let template = BookingsIndexTemplate {
        ctx: PageContext::new(&user, "/bookings"),
        columns: vec![
            TableColumn::new("code", "Booking"),
            TableColumn::new("customer", "Customer"),
            TableColumn::new("branch", "Branch"),
            TableColumn::new("status", "Status"),
            TableColumn::new("scheduled_for", "Scheduled"),
            TableColumn::numeric("payable", "Payable"),
            TableColumn::numeric("paid", "Paid"),
        ],
        filters: vec![
            TableFilter::select("status", "Status", status_filter_options(), status_value.clone()),
            TableFilter::text("search", "Search", "Code or customer", search.map(str::to_string)),
        ],
        rows: listing.items.iter().map(BookingRowView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| list_href(page - 1, status_value.as_deref(), search)),
        next_href: listing
            .has_next_page()
            .then(|| list_href(page + 1, status_value.as_deref(), search)),
        page,
    };

    Ok(render(&template))
}

// =============================================================================
// Detail
// =============================================================================

/// Test line for the detail template.
#[derive(Debug, Clone)]
pub struct BookingLineView {
    pub name: String,
    pub price: String,
}

/// Technician option for the assign form.
#[derive(Debug, Clone)]
pub struct TechnicianOptionView {
    pub id: String,
    pub name: String,
}

impl From<&Technician> for TechnicianOptionView {
    fn from(technician: &Technician) -> Self {
        Self {
            id: technician.id.to_string(),
            name: technician.name.clone(),
        }
    }
}

/// Booking detail page template.
#[derive(Template)]
#[template(path = "bookings/detail.html")]
pub struct BookingDetailTemplate {
    pub ctx: PageContext,
    pub id: String,
    pub code: String,
    pub customer_id: String,
    pub customer: String,
    pub branch: String,
    pub status: &'static str,
    pub technician: String,
    pub scheduled_for: String,
    pub created_at: String,
    pub lines: Vec<BookingLineView>,
    pub total: String,
    pub discount: String,
    pub payable: String,
    pub paid: String,
    /// Assign form rendered for managers while no technician is set.
    pub assign_options: Vec<TechnicianOptionView>,
    pub can_cancel: bool,
}

/// Booking detail page handler.
///
/// GET /bookings/{id}
#[instrument(skip(user, state, session))]
pub async fn show(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let booking = state
        .api()
        .get_booking(&credential, BookingId::new(id))
        .await?;

    // The assign form needs the roster; only managers see it.
    let is_manager = matches!(user.role, Role::SuperAdmin | Role::BranchAdmin);
    let assign_options = if is_manager && booking.technician.is_none() {
        match state.api().list_technicians(&credential).await {
            Ok(technicians) => technicians.iter().map(TechnicianOptionView::from).collect(),
            Err(e) => {
                tracing::error!("Failed to fetch technicians: {e}");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let template = BookingDetailTemplate {
        ctx: PageContext::new(&user, "/bookings"),
        id: booking.id.to_string(),
        code: booking.code.clone(),
        customer_id: booking.customer.id.to_string(),
        customer: booking.customer.name.clone(),
        branch: booking.branch.name.clone(),
        status: booking.status.label(),
        technician: booking
            .technician
            .as_ref()
            .map_or_else(|| "Unassigned".to_string(), |t| t.name.clone()),
        scheduled_for: format_datetime_opt(booking.scheduled_for.as_ref()),
        created_at: format_datetime(&booking.created_at),
        lines: booking
            .tests
            .iter()
            .map(|line| BookingLineView {
                name: line.name.clone(),
                price: line.price.display(),
            })
            .collect(),
        total: booking.total.display(),
        discount: booking.discount.display(),
        payable: booking.payable.display(),
        paid: booking.paid.display(),
        assign_options,
        can_cancel: !matches!(
            booking.status,
            BookingStatus::Completed | BookingStatus::Cancelled
        ),
    };

    Ok(render(&template))
}

// =============================================================================
// Intake
// =============================================================================

/// Prefill query for the intake form.
#[derive(Debug, Deserialize)]
pub struct NewBookingQuery {
    pub customer_id: Option<i64>,
}

/// Branch option for the intake form.
#[derive(Debug, Clone)]
pub struct BranchOptionView {
    pub id: String,
    pub name: String,
}

impl From<&Branch> for BranchOptionView {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id.to_string(),
            name: branch.name.clone(),
        }
    }
}

/// Catalog test checkbox for the intake form.
#[derive(Debug, Clone)]
pub struct TestOptionView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub price: String,
}

impl From<&LabTest> for TestOptionView {
    fn from(test: &LabTest) -> Self {
        Self {
            id: test.id.to_string(),
            code: test.code.clone(),
            name: test.name.clone(),
            price: test.price.display(),
        }
    }
}

/// Booking intake form template.
#[derive(Template)]
#[template(path = "bookings/new.html")]
pub struct BookingNewTemplate {
    pub ctx: PageContext,
    pub customer_id: String,
    pub branches: Vec<BranchOptionView>,
    pub tests: Vec<TestOptionView>,
}

/// Booking intake form handler.
///
/// GET /bookings/new
#[instrument(skip(user, state, session))]
pub async fn new_form(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NewBookingQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let branches = match state.api().list_branches(&credential).await {
        Ok(branches) => branches,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch branches: {e}");
            Vec::new()
        }
    };
    let tests = match state.api().list_tests(&credential, None).await {
        Ok(tests) => tests,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch test catalog: {e}");
            Vec::new()
        }
    };

    let template = BookingNewTemplate {
        ctx: PageContext::new(&user, "/bookings/new"),
        customer_id: query.customer_id.map(|id| id.to_string()).unwrap_or_default(),
        branches: branches.iter().map(BranchOptionView::from).collect(),
        tests: tests
            .iter()
            .filter(|test| test.active)
            .map(TestOptionView::from)
            .collect(),
    };

    Ok(render(&template))
}

/// Create a booking from the intake form.
///
/// POST /bookings/new
///
/// The form posts repeated `test_ids` keys for the checkbox group, so the
/// body is read as raw pairs rather than a struct.
#[instrument(skip_all)]
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let mut customer_id = None;
    let mut branch_id = None;
    let mut scheduled_for = None;
    let mut test_ids = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "customer_id" => customer_id = value.trim().parse::<i64>().ok(),
            "branch_id" => branch_id = value.trim().parse::<i64>().ok(),
            "test_ids" => {
                if let Ok(id) = value.parse::<i64>() {
                    test_ids.push(LabTestId::new(id));
                }
            }
            "scheduled_for" => {
                if !value.trim().is_empty() {
                    scheduled_for = Some(value.trim().to_string());
                }
            }
            _ => {}
        }
    }

    let (Some(customer_id), Some(branch_id)) = (customer_id, branch_id) else {
        return Err(AppError::BadRequest(
            "customer and branch are required".to_string(),
        ));
    };
    if test_ids.is_empty() {
        return Err(AppError::BadRequest(
            "select at least one test".to_string(),
        ));
    }

    let input = BookingInput {
        customer_id: customer_id.into(),
        branch_id: branch_id.into(),
        test_ids,
        scheduled_for,
    };

    let booking = state.api().create_booking(&credential, &input).await?;
    Ok(Redirect::to(&format!("/bookings/{}", booking.id)))
}

// =============================================================================
// Transitions
// =============================================================================

/// Assign form body.
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    pub technician_id: i64,
}

/// Assign a technician to a booking.
///
/// POST /bookings/{id}/assign
#[instrument(skip(state, session))]
pub async fn assign(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<AssignForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let input = AssignInput {
        technician_id: TechnicianId::new(form.technician_id),
    };
    state
        .api()
        .assign_booking(&credential, BookingId::new(id), &input)
        .await?;

    Ok(Redirect::to(&format!("/bookings/{id}")))
}

/// Cancel a booking.
///
/// POST /bookings/{id}/cancel
#[instrument(skip(state, session))]
pub async fn cancel(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    state
        .api()
        .cancel_booking(&credential, BookingId::new(id))
        .await?;

    Ok(Redirect::to(&format!("/bookings/{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_href_preserves_filters() {
        assert_eq!(list_href(2, None, None), "/bookings?page=2");
        assert_eq!(
            list_href(3, Some("PENDING"), None),
            "/bookings?page=3&status=PENDING"
        );
        assert_eq!(
            list_href(1, Some("PENDING"), Some("shah")),
            "/bookings?page=1&status=PENDING&search=shah"
        );
    }

    #[test]
    fn test_status_filter_options_cover_all_statuses() {
        let options = status_filter_options();
        assert_eq!(options.len(), BookingStatus::ALL.len());
        assert!(options.iter().any(|o| o.value == "IN_PROGRESS"));
    }
}
