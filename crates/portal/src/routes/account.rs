//! Customer self-service route handlers.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::api::types::{Booking, BookingFilter, Paginated};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireCustomer;
use crate::state::AppState;

use super::{format_datetime_opt, render, require_credential, PageContext};

const PER_PAGE: u32 = 25;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct MyBookingsQuery {
    pub page: Option<u32>,
}

/// The customer's own booking row.
#[derive(Debug, Clone)]
pub struct MyBookingView {
    pub code: String,
    pub branch: String,
    pub status: &'static str,
    pub scheduled_for: String,
    pub tests: String,
    pub payable: String,
    pub paid: String,
}

impl From<&Booking> for MyBookingView {
    fn from(booking: &Booking) -> Self {
        let tests = booking
            .tests
            .iter()
            .map(|line| line.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            code: booking.code.clone(),
            branch: booking.branch.name.clone(),
            status: booking.status.label(),
            scheduled_for: format_datetime_opt(booking.scheduled_for.as_ref()),
            tests,
            payable: booking.payable.display(),
            paid: booking.paid.display(),
        }
    }
}

/// My-bookings page template.
#[derive(Template)]
#[template(path = "account/bookings.html")]
pub struct MyBookingsTemplate {
    pub ctx: PageContext,
    pub rows: Vec<MyBookingView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// My-bookings page handler.
///
/// GET /my/bookings
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireCustomer(user): RequireCustomer,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MyBookingsQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let filter = BookingFilter {
        own: true,
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
            tracing::error!("Failed to fetch own bookings: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let template = MyBookingsTemplate {
        ctx: PageContext::new(&user, "/my/bookings"),
        rows: listing.items.iter().map(MyBookingView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| format!("/my/bookings?page={}", page - 1)),
        next_href: listing
            .has_next_page()
            .then(|| format!("/my/bookings?page={}", page + 1)),
        page,
    };

    Ok(render(&template))
}
