//! Upload validation and object naming.
//!
//! Nothing here touches storage: a file is checked and named first, and only
//! then handed to a [`BlobStore`](super::BlobStore).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Largest accepted video, in bytes.
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;
/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const NAME_SUFFIX_LEN: usize = 7;
const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Reasons an upload is refused before storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Unknown upload folder: {0}")]
    UnknownFolder(String),

    #[error("No file was provided")]
    MissingFile,

    #[error("Please select an image file")]
    NotAnImage,

    #[error("Please select a video file")]
    NotAVideo,

    #[error("File is too large (max {} MB)", .max / (1024 * 1024))]
    TooLarge { max: usize },

    #[error("File is empty")]
    Empty,
}

/// Top-level folder an upload lands in. Each editor owns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadFolder {
    Clients,
    News,
    Portfolio,
    Services,
    Seo,
    Videos,
}

impl UploadFolder {
    pub const ALL: [Self; 6] = [
        Self::Clients,
        Self::News,
        Self::Portfolio,
        Self::Services,
        Self::Seo,
        Self::Videos,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::News => "news",
            Self::Portfolio => "portfolio",
            Self::Services => "services",
            Self::Seo => "seo",
            Self::Videos => "videos",
        }
    }

    #[must_use]
    pub const fn is_video(self) -> bool {
        matches!(self, Self::Videos)
    }

    #[must_use]
    pub const fn max_bytes(self) -> usize {
        if self.is_video() {
            MAX_VIDEO_BYTES
        } else {
            MAX_IMAGE_BYTES
        }
    }
}

impl fmt::Display for UploadFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadFolder {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|folder| folder.as_str() == s)
            .ok_or_else(|| UploadError::UnknownFolder(s.to_string()))
    }
}

/// Check the declared content type and size against the folder's rules.
///
/// # Errors
///
/// Returns the first rule the file breaks.
pub fn validate(folder: UploadFolder, content_type: &str, size: usize) -> Result<(), UploadError> {
    let media = content_type.trim().to_ascii_lowercase();
    if folder.is_video() {
        if !media.starts_with("video/") {
            return Err(UploadError::NotAVideo);
        }
    } else if !media.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }

    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > folder.max_bytes() {
        return Err(UploadError::TooLarge {
            max: folder.max_bytes(),
        });
    }
    Ok(())
}

/// File extension for the stored object.
///
/// Taken from the client file name when it has a short alphanumeric one,
/// otherwise from the content subtype (`image/svg+xml` gives `svg`).
#[must_use]
pub fn extension(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    from_name.unwrap_or_else(|| {
        content_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .and_then(|subtype| subtype.split(['+', ';']).next())
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
            .map_or_else(|| "bin".to_string(), str::to_ascii_lowercase)
    })
}

/// Unique object path: `{folder}/{unix_millis}-{7 random [a-z0-9]}.{ext}`.
#[must_use]
pub fn object_path(folder: UploadFolder, ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..NAME_SUFFIX_LEN)
        .map(|_| {
            let i = rng.random_range(0..NAME_ALPHABET.len());
            char::from(NAME_ALPHABET.get(i).copied().unwrap_or(b'0'))
        })
        .collect();
    format!("{folder}/{millis}-{suffix}.{ext}")
}
