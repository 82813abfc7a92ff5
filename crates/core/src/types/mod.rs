//! Core value types.
//!
//! Type-safe wrappers for emails, ids, and roles shared by both binaries.

pub mod email;
pub mod id;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::AppRole;
