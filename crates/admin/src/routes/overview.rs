//! Dashboard overview: one card per section.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use brand_mappers_core::store::SettingKey;
use chrono::{DateTime, Utc};
use tracing::instrument;

use super::Shell;
use super::sections::{EDITORS, last_updated};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// One section card.
pub struct SectionCard {
    pub href: String,
    pub title: &'static str,
    pub description: &'static str,
    /// Latest save across the section's keys, formatted for display.
    pub updated: Option<String>,
}

/// Overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub shell: Shell,
    pub cards: Vec<SectionCard>,
    /// The settings store could not be read; every card shows defaults.
    pub store_unavailable: bool,
}

/// GET /
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn overview(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> OverviewTemplate {
    let (updated, store_unavailable) = match state.content().settings().list().await {
        Ok(entries) => (
            entries
                .into_iter()
                .map(|e| (e.key, e.updated_at))
                .collect::<HashMap<SettingKey, DateTime<Utc>>>(),
            false,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Settings list failed");
            (HashMap::new(), true)
        }
    };

    let cards = EDITORS
        .iter()
        .map(|editor| SectionCard {
            href: format!("/{}", editor.slug()),
            title: editor.title(),
            description: editor.description(),
            updated: last_updated(editor.keys(), &updated)
                .map(|at| at.format("%b %-d, %Y %H:%M UTC").to_string()),
        })
        .collect();

    OverviewTemplate {
        shell: Shell::new(&admin, "overview"),
        cards,
        store_unavailable,
    }
}
