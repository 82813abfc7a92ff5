//! Domain models for the admin dashboard.

pub mod session;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use user::{RoleGrant, User, UserCredentials};
