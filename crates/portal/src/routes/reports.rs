//! Report route handlers (managers).
//!
//! Date bounds pass through to the API verbatim; aggregation and validation
//! are server-side.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireManager;
use crate::state::AppState;

use super::{render, require_credential, PageContext};

/// Date range query shared by both reports.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    fn from_bound(&self) -> Option<&str> {
        self.from.as_deref().filter(|s| !s.is_empty())
    }

    fn to_bound(&self) -> Option<&str> {
        self.to.as_deref().filter(|s| !s.is_empty())
    }
}

/// Revenue by branch row.
#[derive(Debug, Clone)]
pub struct BranchRevenueView {
    pub branch: String,
    pub total: String,
}

/// Revenue report template.
#[derive(Template)]
#[template(path = "reports/revenue.html")]
pub struct RevenueTemplate {
    pub ctx: PageContext,
    pub from: String,
    pub to: String,
    pub total: String,
    pub refunded: String,
    pub net: String,
    pub by_branch: Vec<BranchRevenueView>,
}

/// Revenue report handler.
///
/// GET /reports/revenue
#[instrument(skip(user, state, session))]
pub async fn revenue(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<RangeQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let report = state
        .api()
        .revenue_report(&credential, query.from_bound(), query.to_bound())
        .await?;

    let template = RevenueTemplate {
        ctx: PageContext::new(&user, "/reports/revenue"),
        from: query.from.unwrap_or_default(),
        to: query.to.unwrap_or_default(),
        total: report.total.display(),
        refunded: report.refunded.display(),
        net: report.net.display(),
        by_branch: report
            .by_branch
            .iter()
            .map(|row| BranchRevenueView {
                branch: row.branch.clone(),
                total: row.total.display(),
            })
            .collect(),
    };

    Ok(render(&template))
}

/// Booking count by status row.
#[derive(Debug, Clone)]
pub struct StatusCountView {
    pub status: &'static str,
    pub count: u64,
}

/// Bookings report template.
#[derive(Template)]
#[template(path = "reports/bookings.html")]
pub struct BookingsReportTemplate {
    pub ctx: PageContext,
    pub from: String,
    pub to: String,
    pub total: u64,
    pub by_status: Vec<StatusCountView>,
}

/// Bookings report handler.
///
/// GET /reports/bookings
#[instrument(skip(user, state, session))]
pub async fn bookings(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<RangeQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let report = state
        .api()
        .bookings_report(&credential, query.from_bound(), query.to_bound())
        .await?;

    let template = BookingsReportTemplate {
        ctx: PageContext::new(&user, "/reports/bookings"),
        from: query.from.unwrap_or_default(),
        to: query.to.unwrap_or_default(),
        total: report.total,
        by_status: report
            .by_status
            .iter()
            .map(|row| StatusCountView {
                status: row.status.label(),
                count: row.count,
            })
            .collect(),
    };

    Ok(render(&template))
}
