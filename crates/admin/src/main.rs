//! Brand Mappers admin - content dashboard.
//!
//! This binary serves the dashboard on port 3001.
//!
//! # Architecture
//!
//! - Axum web framework with Askama templates for server-side rendering
//! - Section editors write the same `site_settings` rows the site reads
//! - Email and password accounts; the `admin` role is checked per request
//! - Uploads go to a blob store: HTTP object storage or a local directory
//!   served by the site

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use brand_mappers_admin::{
    app,
    config::AdminConfig,
    db::{self, PgIdentityStore},
    middleware::{
        create_session_layer,
        session::{postgres_store, signing_key},
    },
    services::blob,
    state::AppState,
};
use brand_mappers_core::store::{ContentStore, PgSettingsStore};
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
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
            // Admin emails are attached explicitly by the route guard
            send_default_pii: false,
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
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "brand_mappers_admin=info,brand_mappers_core=info,tower_http=debug".into()
    });

    // JSON logs on Fly, human-readable locally
    let fmt_layer = if std::env::var("FLY_APP_NAME").is_ok() {
        tracing_subscriber::fmt::layer().json().flatten_event(true).boxed()
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

    let key = signing_key(&config.session_secret).expect("Invalid session secret");
    let session_store = postgres_store(pool.clone()).expect("Invalid session table");
    let sessions = create_session_layer(session_store, config.secure_cookies(), key);

    let blobs = blob::from_config(&config.blob).expect("Failed to create blob store");
    tracing::info!(backend = ?config.blob, "Blob store configured");

    let state = AppState::new(
        ContentStore::new(Arc::new(PgSettingsStore::new(pool.clone()))),
        Arc::new(PgIdentityStore::new(pool)),
        blobs,
        config.site_base_url.clone(),
    );

    let app = app(state, sessions)
        .layer(
            TraceLayer::new_for_http().on_response(
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
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!(base_url = %config.base_url, "admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
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
