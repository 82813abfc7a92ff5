//! Session middleware configuration for admin.
//!
//! Sessions live in `PostgreSQL` (`admin.session`) and the cookie is signed
//! with the configured secret. The session stores only the signed-in
//! user's id and email; the admin role is re-checked on every request.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "bm_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// `PostgreSQL` session store in the `admin` schema.
///
/// The table is created by the admin migrations, not at startup.
///
/// # Errors
///
/// Returns the store's message if the schema or table name is rejected.
pub fn postgres_store(pool: PgPool) -> Result<PostgresStore, String> {
    PostgresStore::new(pool)
        .with_schema_name("admin")?
        .with_table_name("session")
}

/// Cookie signing key derived from the session secret.
///
/// # Errors
///
/// Returns an error if the secret is shorter than 64 bytes.
pub fn signing_key(secret: &SecretString) -> Result<Key, tower_sessions::cookie::KeyError> {
    Key::try_from(secret.expose_secret().as_bytes())
}

/// Create the session layer over any store.
///
/// Tests pass `tower_sessions::MemoryStore`; `main` passes the
/// [`postgres_store`].
#[must_use]
pub fn create_session_layer<S>(store: S, secure: bool, key: Key) -> SessionManagerLayer<S, tower_sessions::service::SignedCookie>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(SESSION_EXPIRY_SECONDS)))
        .with_secure(secure)
        // Strict: the dashboard is never entered through a cross-site link
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_needs_64_bytes() {
        let short = SecretString::from("k".repeat(63));
        assert!(signing_key(&short).is_err());

        let long = SecretString::from("k".repeat(64));
        assert!(signing_key(&long).is_ok());
    }
}
