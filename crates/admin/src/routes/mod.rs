//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness
//! GET    /health/ready              - Readiness (settings and identity stores reachable)
//!
//! # Auth
//! GET    /auth                      - Sign-in / sign-up page
//! POST   /auth/login                - Sign in (form)
//! POST   /auth/register             - Create an account (form)
//! POST   /auth/logout               - Sign out
//!
//! # Dashboard (admin role required)
//! GET    /                          - Overview of every section
//! GET    /users                     - Admin users
//! GET    /{section}                 - Section editor
//!
//! # JSON API (admin role required)
//! GET    /api/sections/{section}    - Hydrated section
//! PUT    /api/sections/{section}    - Save a whole section
//! POST   /api/uploads/{folder}      - Upload an image (multipart `file`)
//! POST   /api/hero/video            - Upload and publish the hero video
//! POST   /api/users                 - Grant admin by email
//! DELETE /api/users/{role_id}       - Revoke an admin grant
//! ```

pub mod auth;
pub mod health;
pub mod overview;
pub mod sections;
pub mod uploads;
pub mod users;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::middleware::AdminContext;
use crate::services::upload::MAX_VIDEO_BYTES;
use crate::state::AppState;

/// One sidebar entry.
pub struct SidebarLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const SIDEBAR: [(&str, &str, &str); 13] = [
    ("overview", "/", "Overview"),
    ("hero", "/hero", "Hero"),
    ("about", "/about", "About"),
    ("services", "/services", "Services"),
    ("portfolio", "/portfolio", "Portfolio"),
    ("clients", "/clients", "Clients"),
    ("news", "/news", "News"),
    ("cta", "/cta", "CTA"),
    ("navigation", "/navigation", "Navigation"),
    ("footer", "/footer", "Footer"),
    ("theme", "/theme", "Colors & Theme"),
    ("seo", "/seo", "SEO"),
    ("users", "/users", "Admin Users"),
];

/// Layout data shared by every dashboard page.
pub struct Shell {
    /// Signed-in admin's email, shown in the header.
    pub email: String,
    /// Sidebar id of the current page.
    pub active: &'static str,
}

impl Shell {
    #[must_use]
    pub fn new(admin: &AdminContext, active: &'static str) -> Self {
        Self {
            email: admin.email.to_string(),
            active,
        }
    }

    /// Sidebar entries with the current page marked.
    #[must_use]
    pub fn links(&self) -> Vec<SidebarLink> {
        SIDEBAR
            .iter()
            .map(|&(id, href, label)| SidebarLink {
                href,
                label,
                active: id == self.active,
            })
            .collect()
    }
}

/// Liveness and readiness probes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Sign-in, sign-up, and sign-out.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", get(auth::page))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
}

/// Server-rendered dashboard pages.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview::overview))
        .route("/users", get(users::page))
        .route("/{section}", get(sections::editor_page))
}

/// JSON endpoints under `/api`.
pub fn api_routes() -> Router<AppState> {
    // Room for the largest video plus multipart framing
    let upload_limit = DefaultBodyLimit::max(MAX_VIDEO_BYTES + 1024 * 1024);

    Router::new()
        .route(
            "/api/sections/{section}",
            get(sections::get_section).put(sections::put_section),
        )
        .route(
            "/api/uploads/{folder}",
            post(uploads::upload).layer(upload_limit),
        )
        .route("/api/hero/video", post(uploads::hero_video).layer(upload_limit))
        .route("/api/users", post(users::add_admin))
        .route("/api/users/{role_id}", delete(users::remove_admin))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(page_routes())
        .merge(api_routes())
}
