//! Brand Mappers site - public marketing pages.
//!
//! This binary serves the public site on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with Askama templates for server-side rendering
//! - Every page section is read from the `site_settings` table and falls back
//!   to built-in defaults when a key is missing or malformed
//! - Contact form submissions are emailed to the company inbox over SMTP
//!
//! # Security
//!
//! The site only reads settings. All writes go through the admin binary,
//! which is the only one holding sessions and blob store credentials.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, middleware::from_fn};
use brand_mappers_core::store::{ContentStore, PgSettingsStore};
use brand_mappers_site::{
    config::SiteConfig,
    db,
    middleware::{contact_rate_limiter, request_id_middleware, security_headers_middleware},
    routes,
    services::EmailService,
    state::AppState,
};
use sentry::integrations::tracing as sentry_tracing;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SiteConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = SiteConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "brand_mappers_site=info,brand_mappers_core=info,tower_http=debug".into());

    // JSON logs on Fly, human-readable locally
    let fmt_layer = if std::env::var("FLY_APP_NAME").is_ok() {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p brand-mappers-cli -- migrate

    let content = ContentStore::new(Arc::new(PgSettingsStore::new(pool)));

    let email = config.email.as_ref().and_then(|email_config| {
        EmailService::new(email_config)
            .inspect_err(|e| tracing::error!(error = %e, "SMTP setup failed, inquiries will be logged only"))
            .ok()
    });
    if email.is_none() {
        tracing::warn!("SMTP not configured, contact inquiries will be logged only");
    }

    let state = AppState::new(content, email, config.contact_inbox.clone());

    let mut app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::page_routes())
        .nest("/api", routes::api_routes().layer(contact_rate_limiter()))
        .nest_service("/static", ServeDir::new("crates/site/static"));

    // Local blob storage is served from disk; remote stores use their own host
    if let Some(uploads_dir) = &config.uploads_dir {
        tracing::info!(dir = %uploads_dir.display(), "Serving uploads");
        app = app.nest_service("/uploads", ServeDir::new(uploads_dir));
    }

    let app = app
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "response"
                        );
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!(base_url = %config.base_url, "site listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Rate limiting keys on the peer address when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
