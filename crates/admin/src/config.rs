//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_BASE_URL` - Public URL for the admin dashboard
//! - `SITE_BASE_URL` - Public URL of the marketing site (non-admins are sent there)
//! - `ADMIN_SESSION_SECRET` - Cookie signing secret (min 64 chars, high entropy)
//!
//! ## Blob storage (one of)
//! - `BLOB_STORE_URL`, `BLOB_STORE_BUCKET`, `BLOB_STORE_KEY` - HTTP object storage
//! - `UPLOADS_DIR` (default: uploads), `UPLOADS_BASE_URL`
//!   (default: `SITE_BASE_URL` + `/uploads`) - local directory served by the site
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - 0.0 to 1.0 (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Signed cookies need a 64-byte key.
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin dashboard
    pub base_url: String,
    /// Public base URL of the marketing site
    pub site_base_url: String,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Where uploaded files go
    pub blob: BlobConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Blob storage backend selection.
#[derive(Debug, Clone)]
pub enum BlobConfig {
    /// HTTP object storage with bucket-scoped public URLs.
    Http(HttpBlobConfig),
    /// Files written to a directory that the site serves.
    Local(LocalBlobConfig),
}

/// HTTP object storage configuration.
///
/// Implements `Debug` manually to redact the service key.
#[derive(Clone)]
pub struct HttpBlobConfig {
    /// Storage API root, e.g. `https://project.storage.host/storage/v1`
    pub endpoint: Url,
    /// Bucket receiving uploads
    pub bucket: String,
    /// Service key sent as a bearer token
    pub api_key: SecretString,
}

impl std::fmt::Debug for HttpBlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBlobConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("bucket", &self.bucket)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Local directory storage configuration.
#[derive(Debug, Clone)]
pub struct LocalBlobConfig {
    /// Directory uploads are written to
    pub dir: PathBuf,
    /// URL prefix the directory is served under
    pub public_base_url: Url,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ADMIN_DATABASE_URL")?;
        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let site_base_url = get_required_env("SITE_BASE_URL")?;
        let session_secret = get_validated_secret("ADMIN_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "ADMIN_SESSION_SECRET")?;
        let blob = BlobConfig::from_env(&site_base_url)?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            site_base_url,
            session_secret,
            blob,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Cookies are marked `Secure` when the dashboard is served over HTTPS.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BlobConfig {
    fn from_env(site_base_url: &str) -> Result<Self, ConfigError> {
        if let Some(endpoint) = get_optional_env("BLOB_STORE_URL") {
            let endpoint = parse_url("BLOB_STORE_URL", &endpoint)?;
            return Ok(Self::Http(HttpBlobConfig {
                endpoint,
                bucket: get_required_env("BLOB_STORE_BUCKET")?,
                api_key: SecretString::from(get_required_env("BLOB_STORE_KEY")?),
            }));
        }

        let dir = PathBuf::from(get_env_or_default("UPLOADS_DIR", DEFAULT_UPLOADS_DIR));
        let public_base_url = match get_optional_env("UPLOADS_BASE_URL") {
            Some(url) => parse_url("UPLOADS_BASE_URL", &url)?,
            None => parse_url(
                "SITE_BASE_URL",
                &format!("{}/uploads", site_base_url.trim_end_matches('/')),
            )?,
        };
        Ok(Self::Local(LocalBlobConfig {
            dir,
            public_base_url,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let err = validate_secret_strength("your-session-key-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let err = validate_secret_strength(&"ab".repeat(40), "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_session_secret_length() {
        let short = SecretString::from("aB3$xY9!mK2@nL5#");
        assert!(validate_session_secret(&short, "TEST_SESSION").is_err());

        let long = SecretString::from("k".repeat(MIN_SESSION_SECRET_LENGTH));
        assert!(validate_session_secret(&long, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_socket_addr_and_secure_cookies() {
        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/brand_mappers"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "https://admin.brand-mappers.com".to_string(),
            site_base_url: "https://brand-mappers.com".to_string(),
            session_secret: SecretString::from("k".repeat(64)),
            blob: BlobConfig::Local(LocalBlobConfig {
                dir: PathBuf::from("uploads"),
                public_base_url: Url::parse("https://brand-mappers.com/uploads").unwrap(),
            }),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_http_blob_config_debug_redacts_key() {
        let config = HttpBlobConfig {
            endpoint: Url::parse("https://files.brand-mappers.com/storage/v1").unwrap(),
            bucket: "site-media".to_string(),
            api_key: SecretString::from("sb_service_9f8e7d6c"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("site-media"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sb_service_9f8e7d6c"));
    }
}
