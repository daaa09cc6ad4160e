//! Technician work queue route handlers.
//!
//! The server scopes the list to the calling technician via the bearer
//! token (`assigned_to_me`); no technician ID ever travels from here.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::{BookingId, BookingStatus};

use crate::api::ApiError;
use crate::api::types::{Booking, BookingFilter, Paginated};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireTechnician;
use crate::state::AppState;

use super::{format_datetime_opt, render, require_credential, PageContext};

const PER_PAGE: u32 = 25;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct WorklistQuery {
    pub page: Option<u32>,
    /// "completed" switches the view to finished work.
    pub view: Option<String>,
}

/// Work item row.
#[derive(Debug, Clone)]
pub struct WorkItemView {
    pub id: String,
    pub code: String,
    pub customer: String,
    pub branch: String,
    pub status: &'static str,
    pub scheduled_for: String,
    pub tests: String,
    pub can_complete: bool,
}

impl From<&Booking> for WorkItemView {
    fn from(booking: &Booking) -> Self {
        let tests = booking
            .tests
            .iter()
            .map(|line| line.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: booking.id.to_string(),
            code: booking.code.clone(),
            customer: booking.customer.name.clone(),
            branch: booking.branch.name.clone(),
            status: booking.status.label(),
            scheduled_for: format_datetime_opt(booking.scheduled_for.as_ref()),
            tests,
            can_complete: booking.status == BookingStatus::InProgress,
        }
    }
}

/// Work queue page template.
#[derive(Template)]
#[template(path = "worklist/index.html")]
pub struct WorklistTemplate {
    pub ctx: PageContext,
    pub showing_completed: bool,
    pub rows: Vec<WorkItemView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

fn list_href(page: u32, completed: bool) -> String {
    if completed {
        format!("/worklist?page={page}&view=completed")
    } else {
        format!("/worklist?page={page}")
    }
}

/// Work queue page handler.
///
/// GET /worklist
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireTechnician(user): RequireTechnician,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<WorklistQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let showing_completed = query.view.as_deref() == Some("completed");

    let filter = BookingFilter {
        assigned_to_me: true,
        status: showing_completed.then_some(BookingStatus::Completed),
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
            tracing::error!("Failed to fetch work queue: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let template = WorklistTemplate {
        ctx: PageContext::new(&user, "/worklist"),
        showing_completed,
        rows: listing.items.iter().map(WorkItemView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| list_href(page - 1, showing_completed)),
        next_href: listing
            .has_next_page()
            .then(|| list_href(page + 1, showing_completed)),
        page,
    };

    Ok(render(&template))
}

/// Mark a booking's tests complete.
///
/// POST /worklist/{id}/complete
#[instrument(skip(state, session))]
pub async fn complete(
    RequireTechnician(_user): RequireTechnician,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    state
        .api()
        .complete_booking(&credential, BookingId::new(id))
        .await?;

    Ok(Redirect::to("/worklist"))
}
