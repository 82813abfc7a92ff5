//! Application state shared across handlers.

use std::sync::Arc;

use brand_mappers_core::Email;
use brand_mappers_core::store::ContentStore;

use crate::services::EmailService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The site only ever reads the content store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    content: ContentStore,
    email: Option<EmailService>,
    contact_inbox: Email,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Without an `EmailService` contact submissions are logged, not sent.
    #[must_use]
    pub fn new(content: ContentStore, email: Option<EmailService>, contact_inbox: Email) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                content,
                email,
                contact_inbox,
            }),
        }
    }

    /// Typed access to the settings store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Outbound mail, if configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }

    /// Inbox receiving contact form submissions.
    #[must_use]
    pub fn contact_inbox(&self) -> &Email {
        &self.inner.contact_inbox
    }
}
