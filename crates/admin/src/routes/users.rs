//! Admin users: list, grant, and revoke the admin role.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
};
use brand_mappers_core::{AppRole, Email, RoleId};
use serde::Deserialize;
use tracing::instrument;

use super::Shell;
use super::sections::SuccessResponse;
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::RoleGrant;
use crate::state::AppState;

/// Admin users page template.
#[derive(Template, WebTemplate)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub shell: Shell,
    pub grants: Vec<RoleGrant>,
    /// The grant belonging to the viewer, which cannot be removed here.
    pub own_user_id: i32,
    pub load_failed: bool,
}

/// GET /users
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn page(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> UsersTemplate {
    let (grants, load_failed) = match state.identities().list_grants(AppRole::Admin).await {
        Ok(grants) => (grants, false),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list admins");
            (Vec::new(), true)
        }
    };

    UsersTemplate {
        own_user_id: admin.id.as_i32(),
        shell: Shell::new(&admin, "users"),
        grants,
        load_failed,
    }
}

/// Grant request body.
#[derive(Debug, Deserialize)]
pub struct AddAdminRequest {
    pub email: String,
}

/// POST /api/users
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn add_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<AddAdminRequest>,
) -> Result<Json<SuccessResponse>> {
    let not_found = || AppError::NotFound("User not found".to_string());

    let email = Email::parse(&body.email).map_err(|_| not_found())?;
    let user = state
        .identities()
        .find_user_by_email(&email)
        .await?
        .ok_or_else(not_found)?;

    match state.identities().grant_role(user.id, AppRole::Admin).await {
        Ok(grant) => {
            tracing::info!(user_id = %user.id, role_id = %grant.id, "Admin granted");
            Ok(Json(SuccessResponse::new(
                "Admin added",
                format!("{email} can now use the dashboard."),
            )))
        }
        Err(RepositoryError::Conflict(_)) => {
            Err(AppError::Conflict("Already an admin".to_string()))
        }
        Err(RepositoryError::NotFound) => Err(not_found()),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /api/users/{role_id}
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn remove_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(role_id): Path<i32>,
) -> Result<Json<SuccessResponse>> {
    let role_id = RoleId::new(role_id);
    let grant = state
        .identities()
        .find_grant(role_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    if grant.user_id == admin.id {
        return Err(AppError::BadRequest("Cannot remove yourself".to_string()));
    }

    match state.identities().revoke_grant(role_id).await {
        Ok(()) => {
            tracing::info!(user_id = %grant.user_id, %role_id, "Admin revoked");
            Ok(Json(SuccessResponse::new(
                "Admin removed",
                format!("{} no longer has dashboard access.", grant.email),
            )))
        }
        // Removed concurrently; the outcome is the same
        Err(RepositoryError::NotFound) => Ok(Json(SuccessResponse::new(
            "Admin removed",
            format!("{} no longer has dashboard access.", grant.email),
        ))),
        Err(e) => Err(e.into()),
    }
}
