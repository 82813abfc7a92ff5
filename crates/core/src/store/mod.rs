//! Key-value settings persistence.
//!
//! The site keeps every editable document in one table keyed by
//! [`SettingKey`]. [`SettingsStore`] is the narrow interface both binaries
//! use: bulk read by key set, and whole-value upsert by key. There is no
//! versioning and no transaction across keys.
//!
//! [`ContentStore`] layers typed documents on top, with fallback defaults on
//! read and validation on write.

mod content;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use content::{ContentStore, SaveError};
pub use memory::InMemorySettingsStore;
#[cfg(feature = "postgres")]
pub use postgres::PgSettingsStore;

/// The fixed vocabulary of stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    HeroContent,
    HeroStats,
    HeroVideo,
    AboutContent,
    AboutStats,
    ServicesContent,
    ServicesList,
    PortfolioItems,
    ClientsContent,
    ClientsList,
    NewsItems,
    CtaContent,
    NavigationItems,
    FooterContent,
    SeoSettings,
    SiteColors,
    VantaSettings,
}

impl SettingKey {
    /// Every key, in page order.
    pub const ALL: [Self; 17] = [
        Self::HeroContent,
        Self::HeroStats,
        Self::HeroVideo,
        Self::AboutContent,
        Self::AboutStats,
        Self::ServicesContent,
        Self::ServicesList,
        Self::PortfolioItems,
        Self::ClientsContent,
        Self::ClientsList,
        Self::NewsItems,
        Self::CtaContent,
        Self::NavigationItems,
        Self::FooterContent,
        Self::SeoSettings,
        Self::SiteColors,
        Self::VantaSettings,
    ];

    /// The key as stored in the `key` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeroContent => "hero_content",
            Self::HeroStats => "hero_stats",
            Self::HeroVideo => "hero_video",
            Self::AboutContent => "about_content",
            Self::AboutStats => "about_stats",
            Self::ServicesContent => "services_content",
            Self::ServicesList => "services_list",
            Self::PortfolioItems => "portfolio_items",
            Self::ClientsContent => "clients_content",
            Self::ClientsList => "clients_list",
            Self::NewsItems => "news_items",
            Self::CtaContent => "cta_content",
            Self::NavigationItems => "navigation_items",
            Self::FooterContent => "footer_content",
            Self::SeoSettings => "seo_settings",
            Self::SiteColors => "site_colors",
            Self::VantaSettings => "vanta_settings",
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key string outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown setting key: {0}")]
pub struct UnknownSettingKey(pub String);

impl std::str::FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSettingKey(s.to_string()))
    }
}

/// One stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: SettingKey,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

/// Errors raised by a settings backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row has a key outside the vocabulary.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The backend refused or could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Bulk-read and upsert access to the settings table.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch the entries that exist for `keys`. Missing keys are simply absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    async fn select(&self, keys: &[SettingKey]) -> Result<Vec<SettingEntry>, StoreError>;

    /// Insert or replace the whole value under `key` and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write is rejected.
    async fn upsert(&self, key: SettingKey, value: Value) -> Result<SettingEntry, StoreError>;

    /// Every stored entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    async fn list(&self) -> Result<Vec<SettingEntry>, StoreError> {
        self.select(&SettingKey::ALL).await
    }

    /// Cheap reachability probe for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend is unreachable.
    async fn ping(&self) -> Result<(), StoreError> {
        self.select(&[]).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_string_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(key.as_str().parse::<SettingKey>(), Ok(key));
        }
    }

    #[test]
    fn test_key_serde_matches_column_value() {
        for key in SettingKey::ALL {
            let json = serde_json::to_value(key).unwrap_or_default();
            assert_eq!(json, key.as_str());
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            "hero_banner".parse::<SettingKey>(),
            Err(UnknownSettingKey("hero_banner".to_string()))
        );
    }
}
