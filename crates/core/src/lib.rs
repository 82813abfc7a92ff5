//! Brand Mappers Core - content model and settings store.
//!
//! Shared by both web binaries and the CLI:
//! - `site` - public marketing site, read-only over the store
//! - `admin` - content dashboard, the only writer
//! - `cli` - migrations and role management
//!
//! # Modules
//!
//! - [`content`] - Typed documents, their defaults and validation rules
//! - [`store`] - The key-value settings store and typed access on top of it
//! - [`types`] - Newtype wrappers for ids, emails, and roles
//!
//! Database access sits behind the `postgres` feature so the content model
//! can be used and tested without a database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod content;
pub mod store;
pub mod types;

pub use types::*;
