//! Section editors: one page and one JSON endpoint per content section.
//!
//! Sections are distinct Rust types, so the routes dispatch on the slug
//! through [`SectionEditor`] trait objects. A save replaces every document
//! of the section; the editor script always sends the whole section.

use std::collections::HashMap;
use std::marker::PhantomData;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
};
use brand_mappers_core::content::{
    AboutSection, ClientsSection, CtaSection, FooterSection, HeroSection, HeroVideo,
    NavigationSection, NewsSection, PortfolioSection, Section, SeoSection, ServicesSection,
    ThemeSection,
};
use brand_mappers_core::store::{ContentStore, SettingKey};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::Shell;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::services::UploadFolder;
use crate::state::AppState;

/// Type-erased load and save for one section type.
#[async_trait::async_trait]
pub trait SectionEditor: Send + Sync {
    fn slug(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn keys(&self) -> &'static [SettingKey];

    /// Section hydrated from the store, as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization fails.
    async fn load_json(&self, content: &ContentStore) -> serde_json::Result<Value>;

    /// Every document at its fallback, as JSON. Gives the editor the shape
    /// of a new list item when a list is empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization fails.
    fn defaults_json(&self) -> serde_json::Result<Value>;

    /// Parse, validate, and store a whole section. Returns the toast title.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidContent` for a body of the wrong shape and
    /// `AppError::Save` if validation or storage fails.
    async fn save_json(&self, content: &ContentStore, body: Value) -> Result<String>;
}

struct Editor<S>(PhantomData<fn() -> S>);

#[async_trait::async_trait]
impl<S: Section> SectionEditor for Editor<S> {
    fn slug(&self) -> &'static str {
        S::SLUG
    }

    fn title(&self) -> &'static str {
        S::TITLE
    }

    fn description(&self) -> &'static str {
        S::DESCRIPTION
    }

    fn keys(&self) -> &'static [SettingKey] {
        S::KEYS
    }

    async fn load_json(&self, content: &ContentStore) -> serde_json::Result<Value> {
        let section: S = content.load().await;
        serde_json::to_value(&section)
    }

    fn defaults_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(S::defaults())
    }

    async fn save_json(&self, content: &ContentStore, body: Value) -> Result<String> {
        let section: S =
            serde_json::from_value(body).map_err(|e| AppError::InvalidContent(e.to_string()))?;
        content.save(&section).await?;
        Ok(S::saved_message())
    }
}

/// Every editable section, in sidebar order.
pub static EDITORS: [&dyn SectionEditor; 11] = [
    &Editor::<HeroSection>(PhantomData),
    &Editor::<AboutSection>(PhantomData),
    &Editor::<ServicesSection>(PhantomData),
    &Editor::<PortfolioSection>(PhantomData),
    &Editor::<ClientsSection>(PhantomData),
    &Editor::<NewsSection>(PhantomData),
    &Editor::<CtaSection>(PhantomData),
    &Editor::<NavigationSection>(PhantomData),
    &Editor::<FooterSection>(PhantomData),
    &Editor::<ThemeSection>(PhantomData),
    &Editor::<SeoSection>(PhantomData),
];

/// Editor for a slug.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown slug.
pub fn find_editor(slug: &str) -> Result<&'static dyn SectionEditor> {
    EDITORS
        .iter()
        .copied()
        .find(|editor| editor.slug() == slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown section: {slug}")))
}

/// Upload folder used by a section's image fields.
#[must_use]
pub fn upload_folder(slug: &str) -> Option<UploadFolder> {
    match slug {
        "clients" => Some(UploadFolder::Clients),
        "news" => Some(UploadFolder::News),
        "portfolio" => Some(UploadFolder::Portfolio),
        "services" => Some(UploadFolder::Services),
        "seo" => Some(UploadFolder::Seo),
        _ => None,
    }
}

/// Latest write across `keys`, if any key is stored.
#[must_use]
pub fn last_updated(
    keys: &[SettingKey],
    updated: &HashMap<SettingKey, DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    keys.iter().filter_map(|key| updated.get(key)).max().copied()
}

fn to_json_string(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(e.to_string()))
}

// =============================================================================
// Editor page
// =============================================================================

/// Editor page template. The document is embedded as JSON and the form is
/// built by the dashboard script.
#[derive(Template, WebTemplate)]
#[template(path = "section.html")]
pub struct SectionTemplate {
    pub shell: Shell,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub document_json: String,
    pub defaults_json: String,
    pub upload_folder: Option<UploadFolder>,
    /// Current hero video, on the hero page only.
    pub hero_video: Option<HeroVideo>,
}

impl SectionTemplate {
    /// Size cap the video picker enforces before sending anything.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn video_max_bytes(&self) -> usize {
        UploadFolder::Videos.max_bytes()
    }
}

/// GET /{section}
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn editor_page(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> Result<SectionTemplate> {
    let editor = find_editor(&slug)?;
    let content = state.content();

    let document = editor
        .load_json(content)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let defaults = editor
        .defaults_json()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let hero_video = if editor.slug() == HeroSection::SLUG {
        Some(content.load_document::<HeroVideo>().await)
    } else {
        None
    };

    Ok(SectionTemplate {
        shell: Shell::new(&admin, editor.slug()),
        slug: editor.slug(),
        title: editor.title(),
        description: editor.description(),
        document_json: to_json_string(&document)?,
        defaults_json: to_json_string(&defaults)?,
        upload_folder: upload_folder(editor.slug()),
        hero_video,
    })
}

// =============================================================================
// JSON API
// =============================================================================

/// Success body for saves and admin-user changes.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
    pub description: String,
}

impl SuccessResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            description: description.into(),
        }
    }
}

/// GET /api/sections/{section}
#[instrument(skip(state, _admin))]
pub async fn get_section(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let editor = find_editor(&slug)?;
    let document = editor
        .load_json(state.content())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(document))
}

/// PUT /api/sections/{section}
///
/// The body is parsed after the slug is resolved so a wrong shape is
/// reported as invalid content rather than a generic extractor error.
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn put_section(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse>> {
    let editor = find_editor(&slug)?;

    match editor.save_json(state.content(), body).await {
        Ok(message) => {
            tracing::info!(section = editor.slug(), "Section saved");
            Ok(Json(SuccessResponse::new(
                message,
                "Your changes have been published.",
            )))
        }
        Err(AppError::Save(e)) if e.is_partial() => {
            tracing::warn!(section = editor.slug(), error = %e, "Section partially saved");
            Err(AppError::Save(e))
        }
        Err(e) => Err(e),
    }
}
