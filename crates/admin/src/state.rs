//! Application state shared across handlers.

use std::sync::Arc;

use brand_mappers_core::store::ContentStore;

use crate::db::IdentityStore;
use crate::services::{AuthService, BlobStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Every backend sits behind a trait so tests
/// can run the real routers against in-memory stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    content: ContentStore,
    identities: Arc<dyn IdentityStore>,
    blobs: Arc<dyn BlobStore>,
    site_base_url: String,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        content: ContentStore,
        identities: Arc<dyn IdentityStore>,
        blobs: Arc<dyn BlobStore>,
        site_base_url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                content,
                identities,
                blobs,
                site_base_url: site_base_url.into(),
            }),
        }
    }

    /// Typed access to the settings store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Accounts and role grants.
    #[must_use]
    pub fn identities(&self) -> &dyn IdentityStore {
        self.inner.identities.as_ref()
    }

    /// Authentication over the identity store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.identities())
    }

    /// Storage for uploaded media.
    #[must_use]
    pub fn blobs(&self) -> &dyn BlobStore {
        self.inner.blobs.as_ref()
    }

    /// Public site root, without a trailing slash.
    #[must_use]
    pub fn site_base_url(&self) -> &str {
        self.inner.site_base_url.trim_end_matches('/')
    }
}
