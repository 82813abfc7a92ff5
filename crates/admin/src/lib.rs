//! Brand Mappers admin library.
//!
//! The dashboard as a library, so the binary and the integration tests
//! build the same router.
//!
//! # Security
//!
//! This crate holds the only write access to site content, the blob store
//! credentials, and the admin role grants. Every dashboard route requires a
//! signed-in user with the `admin` role.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::services::ServeDir;
use tower_sessions::service::SignedCookie;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Static assets, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Build the admin application with its request middleware.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app<S>(state: AppState, sessions: SessionManagerLayer<S, SignedCookie>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(sessions)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
