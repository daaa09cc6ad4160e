//! Error page handlers.

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::middleware::OptionalUser;

use super::render;

/// Unauthorized (role mismatch) page template.
#[derive(Template)]
#[template(path = "errors/unauthorized.html")]
struct UnauthorizedTemplate {
    name: Option<String>,
}

/// Role-mismatch landing page.
///
/// GET /unauthorized
///
/// Reached by redirect from a guard; renders for any authentication state
/// so the redirect itself can never loop.
pub async fn unauthorized(OptionalUser(identity): OptionalUser) -> Html<String> {
    render(&UnauthorizedTemplate {
        name: identity.map(|identity| identity.name),
    })
}

/// Not-found page template.
#[derive(Template)]
#[template(path = "errors/not_found.html")]
struct NotFoundTemplate;

/// Fallback for unmatched paths.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, render(&NotFoundTemplate))
}
