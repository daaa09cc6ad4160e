//! Audit trail route handlers (super admin only).

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::api::types::{AuditLogEntry, Paginated};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireSuperAdmin;
use crate::state::AppState;

use super::{format_datetime, render, require_credential, PageContext};

const PER_PAGE: u32 = 50;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub page: Option<u32>,
}

/// Audit entry row.
#[derive(Debug, Clone)]
pub struct AuditRowView {
    pub actor: String,
    pub action: String,
    pub entity: String,
    pub detail: String,
    pub created_at: String,
}

impl From<&AuditLogEntry> for AuditRowView {
    fn from(entry: &AuditLogEntry) -> Self {
        Self {
            actor: entry.actor.clone(),
            action: entry.action.clone(),
            entity: entry.entity.clone(),
            detail: entry.detail.clone().unwrap_or_default(),
            created_at: format_datetime(&entry.created_at),
        }
    }
}

/// Audit trail page template.
#[derive(Template)]
#[template(path = "audit/index.html")]
pub struct AuditIndexTemplate {
    pub ctx: PageContext,
    pub rows: Vec<AuditRowView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// Audit trail page handler.
///
/// GET /audit-logs
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AuditQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let result = state
        .api()
        .list_audit_logs(&credential, page, PER_PAGE)
        .await;
    let listing = match result {
        Ok(listing) => listing,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch audit logs: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let template = AuditIndexTemplate {
        ctx: PageContext::new(&user, "/audit-logs"),
        rows: listing.items.iter().map(AuditRowView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| format!("/audit-logs?page={}", page - 1)),
        next_href: listing
            .has_next_page()
            .then(|| format!("/audit-logs?page={}", page + 1)),
        page,
    };

    Ok(render(&template))
}
