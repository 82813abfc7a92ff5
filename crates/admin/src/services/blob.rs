//! Blob storage for uploaded images and videos.
//!
//! An upload writes bytes under a relative path and the file is then served
//! from a public URL. Two backends: a local directory that the site serves
//! under `/uploads`, and an HTTP object storage API addressed as
//! `{endpoint}/object/{bucket}/{path}` with public reads at
//! `{endpoint}/object/public/{bucket}/{path}`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::sync::Mutex;
use url::Url;

use crate::config::{BlobConfig, HttpBlobConfig, LocalBlobConfig};

/// Errors that can occur when storing a blob.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Writing to the local directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Path escapes the storage root or is otherwise unusable.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Backend refused the upload.
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// Write-once file storage with public URLs. `delete` only exists to undo an
/// upload whose follow-up write failed.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path`.
    ///
    /// # Errors
    ///
    /// Returns `BlobError` if the backend rejects or cannot complete the write.
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<(), BlobError>;

    /// Remove the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns `BlobError` if the backend cannot remove it.
    async fn delete(&self, path: &str) -> Result<(), BlobError>;

    /// Public URL a stored path is served from.
    fn public_url(&self, path: &str) -> String;
}

/// Build the configured backend.
///
/// # Errors
///
/// Returns `BlobError` if the HTTP client cannot be built.
pub fn from_config(config: &BlobConfig) -> Result<Arc<dyn BlobStore>, BlobError> {
    Ok(match config {
        BlobConfig::Http(http) => Arc::new(HttpBlobStore::new(http)?),
        BlobConfig::Local(local) => Arc::new(LocalBlobStore::new(local)),
    })
}

/// Reject absolute paths and `..` segments.
fn checked_relative(path: &str) -> Result<&Path, BlobError> {
    let p = Path::new(path);
    let ok = !path.is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_)));
    if ok {
        Ok(p)
    } else {
        Err(BlobError::InvalidPath(path.to_string()))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

// =============================================================================
// Local directory
// =============================================================================

/// Files written under a directory, served by the site.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    dir: PathBuf,
    public_base_url: Url,
}

impl LocalBlobStore {
    #[must_use]
    pub fn new(config: &LocalBlobConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, path: &str, bytes: Bytes, _content_type: &str) -> Result<(), BlobError> {
        let target = self.dir.join(checked_relative(path)?);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        tracing::debug!(path = %target.display(), size = bytes.len(), "Blob written");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), BlobError> {
        let target = self.dir.join(checked_relative(path)?);
        tokio::fs::remove_file(&target).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(self.public_base_url.as_str(), path)
    }
}

// =============================================================================
// HTTP object storage
// =============================================================================

/// Object storage API client.
#[derive(Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpBlobStore {
    /// Create a new object storage client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the key is not a
    /// valid header value.
    pub fn new(config: &HttpBlobConfig) -> Result<Self, BlobError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| BlobError::Rejected(format!("Invalid API key format: {e}")))?,
        );
        // The storage gateway also wants the key on its own header
        headers.insert(
            "apikey",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| BlobError::Rejected(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait::async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<(), BlobError> {
        checked_relative(path)?;
        let url = format!("{}/object/{}/{}", self.endpoint, self.bucket, path);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        api_result(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), BlobError> {
        checked_relative(path)?;
        let url = format!("{}/object/{}/{}", self.endpoint, self.bucket, path);
        let response = self.client.delete(&url).send().await?;
        api_result(response).await
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, path)
    }
}

async fn api_result(response: reqwest::Response) -> Result<(), BlobError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BlobError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(())
}

// =============================================================================
// In memory
// =============================================================================

/// One upload recorded by [`InMemoryBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub path: String,
    pub content_type: String,
    pub size: usize,
}

/// Records uploads without storing bytes. Used by tests.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    uploads: Mutex<Vec<StoredBlob>>,
    rejecting: AtomicBool,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upload fail.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Uploads accepted so far.
    pub async fn uploads(&self) -> Vec<StoredBlob> {
        self.uploads.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, path: &str, bytes: Bytes, content_type: &str) -> Result<(), BlobError> {
        checked_relative(path)?;
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(BlobError::Rejected("store is rejecting uploads".to_string()));
        }
        self.uploads.lock().await.push(StoredBlob {
            path: path.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), BlobError> {
        let mut uploads = self.uploads.lock().await;
        let before = uploads.len();
        uploads.retain(|b| b.path != path);
        if uploads.len() == before {
            return Err(BlobError::Rejected(format!("no object at {path}")));
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url("https://blobs.test", path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_checked_relative() {
        assert!(checked_relative("clients/1-abc.png").is_ok());
        assert!(checked_relative("../etc/passwd").is_err());
        assert!(checked_relative("/abs/path.png").is_err());
        assert!(checked_relative("").is_err());
    }

    #[test]
    fn test_http_public_url() {
        let store = HttpBlobStore::new(&HttpBlobConfig {
            endpoint: Url::parse("https://files.brand-mappers.com/storage/v1/").unwrap(),
            bucket: "site-media".to_string(),
            api_key: SecretString::from("k"),
        })
        .unwrap();
        assert_eq!(
            store.public_url("news/1-abc.jpg"),
            "https://files.brand-mappers.com/storage/v1/object/public/site-media/news/1-abc.jpg"
        );
    }

    #[tokio::test]
    async fn test_local_store_writes_file() {
        let dir = std::env::temp_dir().join(format!(
            "bm-blob-test-{}",
            chrono::Utc::now().timestamp_micros()
        ));
        let store = LocalBlobStore::new(&LocalBlobConfig {
            dir: dir.clone(),
            public_base_url: Url::parse("http://localhost:3000/uploads").unwrap(),
        });

        store
            .upload("seo/1-abc.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.join("seo/1-abc.png")).unwrap(), b"png");
        assert_eq!(
            store.public_url("seo/1-abc.png"),
            "http://localhost:3000/uploads/seo/1-abc.png"
        );

        store.delete("seo/1-abc.png").await.unwrap();
        assert!(!dir.join("seo/1-abc.png").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_in_memory_rejecting() {
        let store = InMemoryBlobStore::new();
        store.set_rejecting(true);
        assert!(
            store
                .upload("news/x.png", Bytes::new(), "image/png")
                .await
                .is_err()
        );
        assert!(store.uploads().await.is_empty());
    }
}
