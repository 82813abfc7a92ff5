//! Admin role management.
//!
//! The dashboard can add and remove admins, but someone has to be first.
//! The account must already exist (sign up at `/auth`).
//!
//! # Usage
//!
//! ```bash
//! bm-cli admin grant -e nour@brand-mappers.com
//! bm-cli admin revoke -e nour@brand-mappers.com
//! bm-cli admin list
//! ```

use brand_mappers_admin::db::{IdentityStore, PgIdentityStore, RepositoryError};
use brand_mappers_core::{AppRole, Email};

use super::{CommandError, connect};

fn parse_email(email: &str) -> Result<Email, CommandError> {
    Email::parse(email).map_err(|e| CommandError::Invalid(format!("Invalid email: {e}")))
}

/// Grant the admin role to an existing account.
///
/// # Errors
///
/// Returns `CommandError` if the account does not exist or the grant fails.
pub async fn grant(email: &str) -> Result<(), CommandError> {
    let email = parse_email(email)?;
    let store = PgIdentityStore::new(connect().await?);

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::Invalid(format!("No account for {email}. Sign up first.")))?;

    match store.grant_role(user.id, AppRole::Admin).await {
        Ok(grant) => {
            tracing::info!(user_id = %user.id, role_id = %grant.id, "Admin granted to {email}");
            Ok(())
        }
        Err(RepositoryError::Conflict(_)) => {
            tracing::info!("{email} is already an admin");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Revoke the admin role from an account.
///
/// # Errors
///
/// Returns `CommandError` if the account has no admin grant.
pub async fn revoke(email: &str) -> Result<(), CommandError> {
    let email = parse_email(email)?;
    let store = PgIdentityStore::new(connect().await?);

    let grant = store
        .list_grants(AppRole::Admin)
        .await?
        .into_iter()
        .find(|g| g.email.as_str().eq_ignore_ascii_case(email.as_str()))
        .ok_or_else(|| CommandError::Invalid(format!("{email} is not an admin")))?;

    store.revoke_grant(grant.id).await?;
    tracing::info!(role_id = %grant.id, "Admin revoked from {email}");
    Ok(())
}

/// Print every admin.
///
/// # Errors
///
/// Returns `CommandError` if the query fails.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let store = PgIdentityStore::new(connect().await?);
    let grants = store.list_grants(AppRole::Admin).await?;

    if grants.is_empty() {
        println!("No admins.");
    }
    for grant in grants {
        println!(
            "{:>5}  {:<12}  {}",
            grant.id.to_string(),
            grant.display_created_at(),
            grant.email
        );
    }
    Ok(())
}
