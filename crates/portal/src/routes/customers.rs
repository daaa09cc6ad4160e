//! Customer route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::CustomerId;

use crate::api::ApiError;
use crate::api::types::{Booking, BookingFilter, Customer, CustomerInput, Paginated};
use crate::components::{TableColumn, TableFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::state::AppState;

use super::{format_datetime, format_datetime_opt, render, require_credential, PageContext};

const PER_PAGE: u32 = 25;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
}

/// Customer row for the list template.
#[derive(Debug, Clone)]
pub struct CustomerRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<&Customer> for CustomerRowView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            email: customer
                .email
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
            phone: customer.phone.clone().unwrap_or_default(),
            created_at: format_datetime(&customer.created_at),
        }
    }
}

/// Customer list page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub ctx: PageContext,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    pub rows: Vec<CustomerRowView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

fn list_href(page: u32, search: Option<&str>) -> String {
    match search {
        Some(search) => format!("/customers?page={page}&search={search}"),
        None => format!("/customers?page={page}"),
    }
}

/// Customer list page handler.
///
/// GET /customers
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CustomerListQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let search = query.search.as_deref().filter(|s| !s.is_empty());

    let result = state
        .api()
        .list_customers(&credential, page, PER_PAGE, search)
        .await;
    let listing = match result {
        Ok(listing) => listing,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch customers: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let template = CustomersIndexTemplate {
        ctx: PageContext::new(&user, "/customers"),
        columns: vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("email", "Email"),
            TableColumn::new("phone", "Phone"),
            TableColumn::new("created_at", "Registered"),
        ],
        filters: vec![TableFilter::text(
            "search",
            "Search",
            "Name, email, or phone",
            search.map(str::to_string),
        )],
        rows: listing.items.iter().map(CustomerRowView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| list_href(page - 1, search)),
        next_href: listing.has_next_page().then(|| list_href(page + 1, search)),
        page,
    };

    Ok(render(&template))
}

// =============================================================================
// Detail
// =============================================================================

/// Booking history row on the customer detail page.
#[derive(Debug, Clone)]
pub struct CustomerBookingView {
    pub id: String,
    pub code: String,
    pub status: &'static str,
    pub scheduled_for: String,
    pub payable: String,
}

impl From<&Booking> for CustomerBookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            code: booking.code.clone(),
            status: booking.status.label(),
            scheduled_for: format_datetime_opt(booking.scheduled_for.as_ref()),
            payable: booking.payable.display(),
        }
    }
}

/// Customer detail page template.
#[derive(Template)]
#[template(path = "customers/detail.html")]
pub struct CustomerDetailTemplate {
    pub ctx: PageContext,
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
    pub bookings: Vec<CustomerBookingView>,
}

/// Customer detail page handler, with recent booking history.
///
/// GET /customers/{id}
#[instrument(skip(user, state, session))]
pub async fn show(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let customer = state
        .api()
        .get_customer(&credential, CustomerId::new(id))
        .await?;

    let filter = BookingFilter {
        customer_id: Some(customer.id),
        ..BookingFilter::default()
    };
    let bookings = match state.api().list_bookings(&credential, 1, 10, &filter).await {
        Ok(listing) => listing.items,
        Err(e) => {
            tracing::error!("Failed to fetch customer bookings: {e}");
            Vec::new()
        }
    };

    let template = CustomerDetailTemplate {
        ctx: PageContext::new(&user, "/customers"),
        id: customer.id.to_string(),
        name: customer.name.clone(),
        email: customer
            .email
            .as_ref()
            .map_or_else(String::new, ToString::to_string),
        phone: customer.phone.clone().unwrap_or_default(),
        created_at: format_datetime(&customer.created_at),
        bookings: bookings.iter().map(CustomerBookingView::from).collect(),
    };

    Ok(render(&template))
}

// =============================================================================
// Intake
// =============================================================================

/// Customer intake form template.
#[derive(Template)]
#[template(path = "customers/new.html")]
pub struct CustomerNewTemplate {
    pub ctx: PageContext,
}

/// Customer intake form handler.
///
/// GET /customers/new
pub async fn new_form(RequireStaff(user): RequireStaff) -> Html<String> {
    render(&CustomerNewTemplate {
        ctx: PageContext::new(&user, "/customers"),
    })
}

/// Customer intake form body.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Register a customer.
///
/// POST /customers/new
#[instrument(skip_all)]
pub async fn create(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let input = CustomerInput {
        name,
        email: form.email.filter(|v| !v.trim().is_empty()),
        phone: form.phone.filter(|v| !v.trim().is_empty()),
    };

    let customer = state.api().create_customer(&credential, &input).await?;
    Ok(Redirect::to(&format!("/customers/{}", customer.id)))
}
