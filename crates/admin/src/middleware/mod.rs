//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (strict CSP, no framing, no caching)
//! 5. Session layer (signed cookie, `PostgreSQL` store)
//!
//! The route guard is not a layer: guarded handlers take the
//! [`RequireAdmin`] extractor.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminContext, GuardRejection, RequireAdmin, clear_current_user, current_user,
    set_current_user,
};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
