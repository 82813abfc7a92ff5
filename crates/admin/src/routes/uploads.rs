//! Media uploads.
//!
//! A file is validated against its folder's rules before anything is sent
//! to the blob store, so a rejected file never leaves a stray object.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use brand_mappers_core::content::HeroVideo;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::upload::{self, UploadError, UploadFolder};
use crate::state::AppState;

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// A file pulled out of the multipart body.
#[derive(Debug)]
pub struct IncomingFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Success body for uploads.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub message: &'static str,
}

fn multipart_error(e: &MultipartError, folder: UploadFolder) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge {
            max: folder.max_bytes(),
        }
        .into()
    } else {
        tracing::warn!(error = %e, "Malformed upload body");
        AppError::BadRequest("Upload failed".to_string())
    }
}

/// Read the `file` field, skipping any others.
async fn read_file(multipart: &mut Multipart, folder: UploadFolder) -> Result<IncomingFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, folder))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e, folder))?;
        return Ok(IncomingFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(UploadError::MissingFile.into())
}

/// A file accepted by the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Object path inside the store.
    pub path: String,
    pub url: String,
}

/// Validate, name, and store a file.
///
/// # Errors
///
/// Returns `AppError::Upload` for a rejected file and `AppError::Blob` if
/// the store write fails.
pub async fn store_file(
    state: &AppState,
    folder: UploadFolder,
    file: IncomingFile,
) -> Result<StoredFile> {
    upload::validate(folder, &file.content_type, file.bytes.len())?;

    let ext = upload::extension(file.file_name.as_deref(), &file.content_type);
    let path = upload::object_path(folder, &ext);
    let size = file.bytes.len();

    state
        .blobs()
        .upload(&path, file.bytes, &file.content_type)
        .await?;

    tracing::info!(%folder, %path, size, "File uploaded");
    let url = state.blobs().public_url(&path);
    Ok(StoredFile { path, url })
}

/// POST /api/uploads/{folder}
#[instrument(skip(state, admin, multipart), fields(admin_id = %admin.id))]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let folder: UploadFolder = folder.parse()?;
    let file = read_file(&mut multipart, folder).await?;
    let stored = store_file(&state, folder, file).await?;

    Ok(Json(UploadResponse {
        success: true,
        url: stored.url,
        message: if folder.is_video() {
            "Video uploaded"
        } else {
            "Image uploaded"
        },
    }))
}

/// POST /api/hero/video
///
/// Uploads to `videos` and publishes the URL as the hero background. If the
/// URL cannot be saved the new object is removed again.
#[instrument(skip(state, admin, multipart), fields(admin_id = %admin.id))]
pub async fn hero_video(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let folder = UploadFolder::Videos;
    let file = read_file(&mut multipart, folder).await?;
    let stored = store_file(&state, folder, file).await?;

    let saved = state
        .content()
        .save_document(&HeroVideo {
            url: Some(stored.url.clone()),
        })
        .await;
    if let Err(e) = saved {
        if let Err(cleanup) = state.blobs().delete(&stored.path).await {
            tracing::warn!(path = %stored.path, error = %cleanup, "Orphaned hero video left in blob store");
        }
        return Err(e.into());
    }

    Ok(Json(UploadResponse {
        success: true,
        url: stored.url,
        message: "Hero video updated",
    }))
}
