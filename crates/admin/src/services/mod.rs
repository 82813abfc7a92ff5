//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Email and password authentication, route guard state
//! - `blob` - Blob storage backends for uploaded media
//! - `upload` - Upload validation and object naming

pub mod auth;
pub mod blob;
pub mod upload;

pub use auth::{AuthError, AuthService, GuardState};
pub use blob::{BlobError, BlobStore, HttpBlobStore, InMemoryBlobStore, LocalBlobStore};
pub use upload::{UploadError, UploadFolder};
