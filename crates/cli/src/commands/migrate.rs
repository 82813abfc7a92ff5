//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bm-cli migrate
//! ```
//!
//! Migrations live in `crates/admin/migrations/` and cover the settings
//! table, accounts and role grants, and the admin session table.

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
