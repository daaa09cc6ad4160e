//! Branch management route handlers (super admin only).

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::api::types::{Branch, BranchInput};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireSuperAdmin;
use crate::state::AppState;

use super::{format_datetime, render, require_credential, PageContext};

/// Branch row for the list template.
#[derive(Debug, Clone)]
pub struct BranchRowView {
    pub name: String,
    pub city: String,
    pub phone: String,
    pub created_at: String,
}

impl From<&Branch> for BranchRowView {
    fn from(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            city: branch.city.clone().unwrap_or_default(),
            phone: branch.phone.clone().unwrap_or_default(),
            created_at: format_datetime(&branch.created_at),
        }
    }
}

/// Branch list page template. Includes the create form.
#[derive(Template)]
#[template(path = "branches/index.html")]
pub struct BranchesIndexTemplate {
    pub ctx: PageContext,
    pub rows: Vec<BranchRowView>,
}

/// Branch list page handler.
///
/// GET /branches
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
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

    let template = BranchesIndexTemplate {
        ctx: PageContext::new(&user, "/branches"),
        rows: branches.iter().map(BranchRowView::from).collect(),
    };

    Ok(render(&template))
}

/// Branch create form body.
#[derive(Debug, Deserialize)]
pub struct BranchForm {
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
}

/// Open a branch.
///
/// POST /branches
#[instrument(skip_all)]
pub async fn create(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BranchForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("branch name is required".to_string()));
    }

    let input = BranchInput {
        name,
        city: form.city.filter(|v| !v.trim().is_empty()),
        phone: form.phone.filter(|v| !v.trim().is_empty()),
    };
    state.api().create_branch(&credential, &input).await?;

    Ok(Redirect::to("/branches"))
}
