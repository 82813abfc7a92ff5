//! Account and role persistence.
//!
//! ## Tables
//!
//! - `users` - Email and Argon2 password hash
//! - `user_roles` - Role grants; a user is an admin iff an `admin` row exists
//! - `admin.session` - Tower-sessions storage
//! - `site_settings` - Content documents (accessed through `brand_mappers_core`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p brand-mappers-cli -- migrate
//! ```

mod memory;
pub mod users;

use std::time::Duration;

use brand_mappers_core::{AppRole, Email, RoleId, UserId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::{RoleGrant, User, UserCredentials};

pub use memory::InMemoryIdentityStore;
pub use users::PgIdentityStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Accounts and role grants.
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    async fn create_user(&self, email: &Email, password_hash: &str)
    -> Result<User, RepositoryError>;

    /// Account plus password hash for sign-in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, RepositoryError>;

    /// Account by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Whether at least one grant of `role` exists for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails. Callers guarding
    /// access must treat an error as "no".
    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, RepositoryError>;

    /// Every grant of `role`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn list_grants(&self, role: AppRole) -> Result<Vec<RoleGrant>, RepositoryError>;

    /// Grant `role` to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already holds the role.
    async fn grant_role(&self, user_id: UserId, role: AppRole)
    -> Result<RoleGrant, RepositoryError>;

    /// One grant by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    async fn find_grant(&self, id: RoleId) -> Result<Option<RoleGrant>, RepositoryError>;

    /// Delete one grant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such grant exists.
    async fn revoke_grant(&self, id: RoleId) -> Result<(), RepositoryError>;

    /// Cheap reachability probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend is unreachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
