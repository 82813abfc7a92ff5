//! Route guard extractor and session helpers for admin.
//!
//! Every dashboard handler takes [`RequireAdmin`]. The extractor reads the
//! session, then asks the identity store whether the user holds the admin
//! role. Page requests are redirected; `/api/*` requests get JSON errors.

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use brand_mappers_core::{Email, UserId};
use tower_sessions::Session;

use crate::error::{ErrorBody, set_sentry_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::GuardState;
use crate::state::AppState;

/// Sign-in page.
pub const AUTH_PATH: &str = "/auth";

/// The signed-in admin, handed to every guarded handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    pub id: UserId,
    pub email: Email,
}

/// Extractor that requires a signed-in user holding the admin role.
pub struct RequireAdmin(pub AdminContext);

/// Why the guard turned a request away.
#[derive(Debug)]
pub enum GuardRejection {
    /// No session: go sign in.
    RedirectToAuth,
    /// Signed in without admin rights: back to the public site.
    RedirectToSite(String),
    /// API request without a session.
    Unauthorized,
    /// API request from a non-admin.
    Forbidden,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let json = |status: StatusCode, message: &str| {
            (
                status,
                Json(ErrorBody {
                    success: false,
                    message: message.to_string(),
                    description: None,
                }),
            )
                .into_response()
        };
        match self {
            Self::RedirectToAuth => Redirect::to(AUTH_PATH).into_response(),
            Self::RedirectToSite(url) => Redirect::to(&url).into_response(),
            Self::Unauthorized => json(StatusCode::UNAUTHORIZED, "Not signed in"),
            Self::Forbidden => json(StatusCode::FORBIDDEN, "Access Denied"),
        }
    }
}

/// Where non-admins are sent.
#[must_use]
pub fn access_denied_url(site_base_url: &str) -> String {
    format!("{}/?notice=access-denied", site_base_url.trim_end_matches('/'))
}

fn is_api_request(parts: &Parts) -> bool {
    // Nested routers see a stripped URI; the original keeps the prefix
    parts
        .extensions
        .get::<OriginalUri>()
        .map_or_else(|| parts.uri.path(), |uri| uri.path())
        .starts_with("/api/")
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let is_api = is_api_request(parts);

        let current = match parts.extensions.get::<Session>() {
            Some(session) => current_user(session).await,
            None => None,
        };

        match state.auth().guard_state(current).await {
            GuardState::Admin(user) => {
                set_sentry_user(user.id.as_i32(), user.email.as_str());
                Ok(Self(AdminContext {
                    id: user.id,
                    email: user.email,
                }))
            }
            GuardState::NonAdmin(user) => {
                tracing::info!(user_id = %user.id, "Non-admin turned away from dashboard");
                Err(if is_api {
                    GuardRejection::Forbidden
                } else {
                    GuardRejection::RedirectToSite(access_denied_url(state.site_base_url()))
                })
            }
            GuardState::Unauthenticated => Err(if is_api {
                GuardRejection::Unauthorized
            } else {
                GuardRejection::RedirectToAuth
            }),
        }
    }
}

/// The user stored in the session, if any. Unreadable sessions count as
/// signed out.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to read session"))
        .ok()
        .flatten()
}

/// Store the signed-in user in the session.
///
/// Cycles the session id first so a pre-login id cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Drop the whole session (sign out).
///
/// # Errors
///
/// Returns an error if the session store cannot be updated.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_url() {
        assert_eq!(
            access_denied_url("https://brand-mappers.com/"),
            "https://brand-mappers.com/?notice=access-denied"
        );
        assert_eq!(
            access_denied_url("http://localhost:3000"),
            "http://localhost:3000/?notice=access-denied"
        );
    }

    #[test]
    fn test_rejection_statuses() {
        assert_eq!(
            GuardRejection::RedirectToAuth.into_response().status(),
            StatusCode::SEE_OTHER
        );
        assert_eq!(
            GuardRejection::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GuardRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
