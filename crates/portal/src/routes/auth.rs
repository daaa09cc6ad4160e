//! Authentication route handlers.
//!
//! The portal holds no passwords; sign-in is a credential exchange with the
//! remote API. A failed attempt re-renders the form with an inline error
//! and leaves the session untouched.

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::Email;

use crate::guard::{LANDING_PATH, SIGNIN_PATH};
use crate::middleware::RequireGuest;
use crate::session::LoginOutcome;
use crate::state::AppState;

use super::render;

/// Sign-in page template.
#[derive(Template)]
#[template(path = "auth/signin.html")]
struct SigninTemplate {
    error: Option<String>,
    email: String,
}

/// Sign-in form body.
#[derive(Debug, Deserialize)]
pub struct SigninForm {
    email: String,
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(SIGNIN_PATH, get(signin_page).post(signin))
        .route("/logout", post(logout))
}

/// Render the sign-in page.
///
/// GET /signin
async fn signin_page(_guest: RequireGuest) -> Html<String> {
    render(&SigninTemplate {
        error: None,
        email: String::new(),
    })
}

/// Attempt the credential exchange.
///
/// POST /signin
#[instrument(skip_all, fields(email = %form.email))]
async fn signin(
    _guest: RequireGuest,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SigninForm>,
) -> Response {
    let Ok(email) = Email::parse(form.email.trim()) else {
        return render(&SigninTemplate {
            error: Some("Enter a valid email address.".to_string()),
            email: form.email,
        })
        .into_response();
    };

    match state
        .sessions()
        .login(&session, &email, &form.password)
        .await
    {
        LoginOutcome::Success => Redirect::to(LANDING_PATH).into_response(),
        LoginOutcome::Rejected => render(&SigninTemplate {
            error: Some("Invalid email or password.".to_string()),
            email: form.email,
        })
        .into_response(),
    }
}

/// Sign out and return to the sign-in page.
///
/// POST /logout
async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    state.sessions().logout(&session).await;
    crate::error::clear_sentry_user();
    Redirect::to(SIGNIN_PATH)
}
