//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (?category= filters portfolio, ?notice= shows a banner)
//! GET  /careers          - Open positions
//! GET  /theme.css        - Theme colors as CSS custom properties
//! POST /api/contact      - Contact form submission (JSON)
//! GET  /health           - Liveness
//! GET  /health/ready     - Readiness (settings store reachable)
//! ```

pub mod careers;
pub mod contact;
pub mod health;
pub mod home;
pub mod theme;

use axum::{
    Router,
    routing::{get, post},
};
use brand_mappers_core::content::{FooterSection, NavigationSection, SeoSection};
use brand_mappers_core::store::ContentStore;

use crate::state::AppState;

/// Navigation, footer, and `<head>` metadata shared by every page.
pub struct PageChrome {
    pub navigation: NavigationSection,
    pub footer: FooterSection,
    pub seo: SeoSection,
}

impl PageChrome {
    /// Hydrate the shared sections concurrently.
    pub async fn load(content: &ContentStore) -> Self {
        let (navigation, footer, seo) = tokio::join!(
            content.load::<NavigationSection>(),
            content.load::<FooterSection>(),
            content.load::<SeoSection>(),
        );
        Self {
            navigation,
            footer,
            seo,
        }
    }
}

/// Liveness and readiness probes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Server-rendered pages.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/careers", get(careers::careers))
        .route("/theme.css", get(theme::stylesheet))
}

/// JSON endpoints, nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(page_routes())
        .nest("/api", api_routes())
}
