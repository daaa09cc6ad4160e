//! Technician roster route handlers (managers).

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
use crate::api::types::{Branch, Technician, TechnicianInput};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireManager;
use crate::state::AppState;

use super::{render, require_credential, PageContext};

/// Technician row for the roster template.
#[derive(Debug, Clone)]
pub struct TechnicianRowView {
    pub name: String,
    pub email: String,
    pub branch: String,
    pub active: bool,
}

impl From<&Technician> for TechnicianRowView {
    fn from(technician: &Technician) -> Self {
        Self {
            name: technician.name.clone(),
            email: technician
                .email
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
            branch: technician
                .branch
                .as_ref()
                .map_or_else(String::new, |b| b.name.clone()),
            active: technician.active,
        }
    }
}

/// Branch option for the create form.
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

/// Roster page template. Includes the create form.
#[derive(Template)]
#[template(path = "technicians/index.html")]
pub struct TechniciansIndexTemplate {
    pub ctx: PageContext,
    pub rows: Vec<TechnicianRowView>,
    pub branches: Vec<BranchOptionView>,
}

/// Roster page handler.
///
/// GET /technicians
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let technicians = match state.api().list_technicians(&credential).await {
        Ok(technicians) => technicians,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch technicians: {e}");
            Vec::new()
        }
    };
    let branches = match state.api().list_branches(&credential).await {
        Ok(branches) => branches,
        Err(e) => {
            tracing::error!("Failed to fetch branches: {e}");
            Vec::new()
        }
    };

    let template = TechniciansIndexTemplate {
        ctx: PageContext::new(&user, "/technicians"),
        rows: technicians.iter().map(TechnicianRowView::from).collect(),
        branches: branches.iter().map(BranchOptionView::from).collect(),
    };

    Ok(render(&template))
}

/// Technician create form body.
#[derive(Debug, Deserialize)]
pub struct TechnicianForm {
    pub name: String,
    pub email: Option<String>,
    pub branch_id: Option<i64>,
}

/// Add a technician to the roster.
///
/// POST /technicians
#[instrument(skip_all)]
pub async fn create(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TechnicianForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("technician name is required".to_string()));
    }

    let input = TechnicianInput {
        name,
        email: form.email.filter(|v| !v.trim().is_empty()),
        branch_id: form.branch_id.map(Into::into),
    };
    state.api().create_technician(&credential, &input).await?;

    Ok(Redirect::to("/technicians"))
}
