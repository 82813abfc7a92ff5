//! Session-stored identity.

use serde::{Deserialize, Serialize};

use brand_mappers_core::{Email, UserId};

/// The signed-in account. Only the id and email live in the session; the
/// admin role is looked up on every guarded request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";
}
