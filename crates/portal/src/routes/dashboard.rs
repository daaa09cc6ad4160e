//! Dashboard route handler.
//!
//! The landing page is role-aware: staff see branch activity, technicians
//! see their queue, customers see their own bookings. All numbers come from
//! the same paginated booking endpoint; the envelope's `total` doubles as
//! the headline count.

use askama::Template;
use axum::{extract::State, response::Html};
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::{BookingStatus, Role};

use crate::api::ApiError;
use crate::api::types::{Booking, BookingFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireUser;
use crate::state::AppState;

use super::{format_datetime, render, require_credential, PageContext};

/// Headline metric tile.
#[derive(Debug, Clone)]
pub struct MetricView {
    pub label: &'static str,
    pub value: String,
}

/// Recent booking row.
#[derive(Debug, Clone)]
pub struct RecentBookingView {
    pub id: String,
    pub code: String,
    pub customer: String,
    pub status: &'static str,
    pub payable: String,
    pub created_at: String,
}

impl From<&Booking> for RecentBookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            code: booking.code.clone(),
            customer: booking.customer.name.clone(),
            status: booking.status.label(),
            payable: booking.payable.display(),
            created_at: format_datetime(&booking.created_at),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub metrics: Vec<MetricView>,
    pub recent_title: &'static str,
    pub recent: Vec<RecentBookingView>,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;
    crate::error::set_sentry_user(user.id.as_i64(), Some(&user.name));

    let (filter, recent_title) = match user.role {
        Role::Technician => (
            BookingFilter {
                assigned_to_me: true,
                ..BookingFilter::default()
            },
            "Your queue",
        ),
        Role::Customer => (
            BookingFilter {
                own: true,
                ..BookingFilter::default()
            },
            "Your bookings",
        ),
        _ => (BookingFilter::default(), "Recent bookings"),
    };

    let recent_page = match state.api().list_bookings(&credential, 1, 5, &filter).await {
        Ok(page) => page,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch dashboard bookings: {e}");
            crate::api::types::Paginated::empty(5)
        }
    };

    let mut metrics = vec![MetricView {
        label: match user.role {
            Role::Technician => "Assigned bookings",
            Role::Customer => "Your bookings",
            _ => "Total bookings",
        },
        value: recent_page.total.to_string(),
    }];

    // Staff get a pending-work tile; the envelope total is all we need.
    if matches!(
        user.role,
        Role::SuperAdmin | Role::BranchAdmin | Role::Receptionist
    ) {
        let pending_filter = BookingFilter {
            status: Some(BookingStatus::Pending),
            ..BookingFilter::default()
        };
        match state
            .api()
            .list_bookings(&credential, 1, 1, &pending_filter)
            .await
        {
            Ok(page) => metrics.push(MetricView {
                label: "Pending",
                value: page.total.to_string(),
            }),
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
            Err(e) => tracing::error!("Failed to fetch pending count: {e}"),
        }
    }

    let template = DashboardTemplate {
        ctx: PageContext::new(&user, "/dashboard"),
        metrics,
        recent_title,
        recent: recent_page.items.iter().map(RecentBookingView::from).collect(),
    };

    Ok(render(&template))
}
