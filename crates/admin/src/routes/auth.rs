//! Sign-in, sign-up, and sign-out.
//!
//! Failures always show one generic message per form, whatever the cause,
//! so the page never reveals whether an email is registered.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::middleware::auth::AUTH_PATH;
use crate::middleware::{clear_current_user, current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthError;
use crate::services::auth::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::state::AppState;

pub const SIGN_IN_FAILED: &str = "Invalid email or password. Please try again.";
pub const SIGN_UP_FAILED: &str =
    "Unable to create account. Please try a different email or contact support.";
pub const SIGN_UP_DONE: &str = "If this email is valid, you will receive further instructions.";

/// Which form the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Signin,
    Signup,
}

/// Query parameters for the auth page.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    #[serde(default)]
    pub mode: AuthMode,
}

/// Sign-in / sign-up form body.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// Auth page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub mode: AuthMode,
    pub email: String,
    pub error: Option<&'static str>,
    pub notice: Option<&'static str>,
    pub min_password: usize,
    pub max_password: usize,
}

impl AuthTemplate {
    fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            error: None,
            notice: None,
            min_password: MIN_PASSWORD_LENGTH,
            max_password: MAX_PASSWORD_LENGTH,
        }
    }

    #[must_use]
    pub fn is_signup(&self) -> bool {
        self.mode == AuthMode::Signup
    }
}

/// GET /auth
///
/// A signed-in visitor goes straight to the dashboard; the guard decides
/// from there.
pub async fn page(session: Session, Query(query): Query<AuthQuery>) -> Response {
    if current_user(&session).await.is_some() {
        return Redirect::to("/").into_response();
    }
    AuthTemplate::new(query.mode).into_response()
}

/// POST /auth/login
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.auth().sign_in(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                email: user.email,
            };
            if let Err(e) = set_current_user(&session, &current).await {
                return AppError::Internal(format!("session write failed: {e}")).into_response();
            }
            tracing::info!(user_id = %current.id, "Signed in");
            add_breadcrumb("auth", "Signed in");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            log_auth_failure("Sign-in", &e);
            let mut page = AuthTemplate::new(AuthMode::Signin);
            page.email = form.email.trim().to_string();
            page.error = Some(SIGN_IN_FAILED);
            page.into_response()
        }
    }
}

/// POST /auth/register
///
/// Creates a plain account. Dashboard access still needs an admin grant.
#[instrument(skip(state, form))]
pub async fn register(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.auth().sign_up(&form.email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Account created");
            let mut page = AuthTemplate::new(AuthMode::Signin);
            page.email = user.email.to_string();
            page.notice = Some(SIGN_UP_DONE);
            page.into_response()
        }
        Err(e) => {
            log_auth_failure("Sign-up", &e);
            let mut page = AuthTemplate::new(AuthMode::Signup);
            page.email = form.email.trim().to_string();
            page.error = Some(SIGN_UP_FAILED);
            page.into_response()
        }
    }
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "Failed to clear session");
    }
    Redirect::to(AUTH_PATH)
}

/// Expected failures at info, infrastructure failures at error.
fn log_auth_failure(action: &str, e: &AuthError) {
    match e {
        AuthError::Repository(_) | AuthError::PasswordHash => {
            tracing::error!(error = %e, "{action} failed");
        }
        _ => tracing::info!(error = %e, "{action} rejected"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse_query(uri: &str) -> AuthQuery {
        let uri: axum::http::Uri = uri.parse().unwrap();
        Query::<AuthQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_mode_query() {
        assert_eq!(parse_query("/auth?mode=signup").mode, AuthMode::Signup);
        assert_eq!(parse_query("/auth").mode, AuthMode::Signin);
    }

    #[test]
    fn test_failure_messages_are_generic() {
        assert!(!SIGN_IN_FAILED.contains("not found"));
        assert!(!SIGN_UP_FAILED.contains("exists"));
    }
}
