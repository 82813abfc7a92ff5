//! Unified error handling for admin.
//!
//! Every error renders as the JSON body the dashboard script turns into a
//! toast: `{"success": false, "message": "...", "description": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use brand_mappers_core::store::SaveError;
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{BlobError, UploadError};

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Saving content failed validation or storage.
    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    /// Upload refused before storage.
    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    /// Blob store write failed.
    #[error("Blob store error: {0}")]
    Blob(#[from] BlobError),

    /// Request body does not match the section shape.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure body understood by the dashboard script.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Save(SaveError::Invalid(_)) | Self::InvalidContent(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Save(SaveError::Store { .. }) | Self::Blob(_) => StatusCode::BAD_GATEWAY,
            Self::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upload(UploadError::UnknownFolder(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Upload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    // Don't expose internal error details to clients
    fn body(&self) -> ErrorBody {
        let (message, description) = match self {
            Self::Database(_) | Self::Internal(_) => ("Internal server error".to_string(), None),
            Self::Save(SaveError::Invalid(e)) => ("Invalid content".to_string(), Some(e.to_string())),
            Self::InvalidContent(detail) => ("Invalid content".to_string(), Some(detail.clone())),
            Self::Save(SaveError::Store { .. }) => (
                "Error saving".to_string(),
                Some("Could not save changes. Please try again.".to_string()),
            ),
            Self::Upload(e) => ("Upload failed".to_string(), Some(e.to_string())),
            Self::Blob(_) => (
                "Upload failed".to_string(),
                Some("Could not store the file. Please try again.".to_string()),
            ),
            Self::Unauthorized(_) => ("Not signed in".to_string(), None),
            Self::Forbidden(_) => ("Access Denied".to_string(), None),
            Self::NotFound(msg) | Self::Conflict(msg) | Self::BadRequest(msg) => {
                (msg.clone(), None)
            }
        };
        ErrorBody {
            success: false,
            message,
            description,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Blob(_) | Self::Save(SaveError::Store { .. })
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for admin actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(user_id: i32, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}
