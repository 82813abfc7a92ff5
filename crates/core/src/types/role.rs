//! Application roles granted to accounts.

use serde::{Deserialize, Serialize};

/// Role granted to a user through a `user_roles` row.
///
/// A user is an administrator iff at least one `admin` row exists for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "app_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    /// May sign in to the dashboard and edit every section.
    Admin,
    /// Signed-up account with no dashboard access.
    User,
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for AppRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
