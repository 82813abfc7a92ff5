//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod settings;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Identity store error.
    #[error("Repository error: {0}")]
    Repository(#[from] brand_mappers_admin::db::RepositoryError),

    /// Settings store error.
    #[error("Settings store error: {0}")]
    Store(#[from] brand_mappers_core::store::StoreError),

    /// Bad argument.
    #[error("{0}")]
    Invalid(String),
}

/// Database URL: `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("ADMIN_DATABASE_URL"))
}

/// Connect to the database every command works on.
async fn connect() -> Result<PgPool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    Ok(brand_mappers_admin::db::create_pool(&url).await?)
}
