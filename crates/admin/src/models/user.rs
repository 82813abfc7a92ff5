//! Account and role grant domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use brand_mappers_core::{AppRole, Email, RoleId, UserId};

/// A signed-up account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// An account together with its stored password hash.
///
/// Only the sign-in path sees this; the hash never leaves the auth service.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// One `user_roles` row, joined with the account email for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub id: RoleId,
    pub user_id: UserId,
    pub email: Email,
    pub role: AppRole,
    pub created_at: DateTime<Utc>,
}

impl RoleGrant {
    /// Grant date as shown in the admin users table.
    #[must_use]
    pub fn display_created_at(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}
