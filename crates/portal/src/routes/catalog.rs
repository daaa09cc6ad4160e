//! Test catalog route handlers.
//!
//! All staff can browse the catalog; adding tests is a manager action, so
//! the create handler carries the narrower guard while the page itself
//! hides the form from receptionists.

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::Role;

use crate::api::ApiError;
use crate::api::types::{LabTest, LabTestInput};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireManager, RequireStaff};
use crate::state::AppState;

use super::{render, require_credential, PageContext};

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
}

/// Catalog row for the list template.
#[derive(Debug, Clone)]
pub struct LabTestRowView {
    pub code: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub active: bool,
}

impl From<&LabTest> for LabTestRowView {
    fn from(test: &LabTest) -> Self {
        Self {
            code: test.code.clone(),
            name: test.name.clone(),
            category: test.category.clone().unwrap_or_default(),
            price: test.price.display(),
            active: test.active,
        }
    }
}

/// Catalog page template. The create form renders for managers only.
#[derive(Template)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub ctx: PageContext,
    pub rows: Vec<LabTestRowView>,
    pub search: String,
    pub can_create: bool,
}

/// Catalog page handler.
///
/// GET /tests
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let search = query.search.as_deref().filter(|s| !s.is_empty());
    let tests = match state.api().list_tests(&credential, search).await {
        Ok(tests) => tests,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch test catalog: {e}");
            Vec::new()
        }
    };

    let template = CatalogIndexTemplate {
        ctx: PageContext::new(&user, "/tests"),
        rows: tests.iter().map(LabTestRowView::from).collect(),
        search: search.unwrap_or_default().to_string(),
        can_create: matches!(user.role, Role::SuperAdmin | Role::BranchAdmin),
    };

    Ok(render(&template))
}

/// Catalog create form body.
#[derive(Debug, Deserialize)]
pub struct LabTestForm {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub price: String,
}

/// Add a test to the catalog.
///
/// POST /tests
#[instrument(skip_all)]
pub async fn create(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LabTestForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let code = form.code.trim().to_uppercase();
    let name = form.name.trim().to_string();
    if code.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest("code and name are required".to_string()));
    }

    let input = LabTestInput {
        code,
        name,
        category: form.category.filter(|v| !v.trim().is_empty()),
        price: form.price.trim().to_string(),
    };
    state.api().create_test(&credential, &input).await?;

    Ok(Redirect::to("/tests"))
}
