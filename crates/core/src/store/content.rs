//! Typed load and save of content sections.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use thiserror::Error;

use super::{SettingKey, SettingsStore, StoreError};
use crate::content::{Document, EncodeError, Section, encode, hydrate};

/// A save did not fully complete.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The submitted content was rejected before any write.
    #[error(transparent)]
    Invalid(#[from] EncodeError),

    /// At least one upsert failed. Keys in `committed` were written anyway.
    #[error("failed to save {}", describe_failures(.failed))]
    Store {
        committed: Vec<SettingKey>,
        failed: Vec<(SettingKey, StoreError)>,
    },
}

impl SaveError {
    /// Some keys of a multi-key save were written before another failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Store { committed, .. } if !committed.is_empty())
    }
}

fn describe_failures(failed: &[(SettingKey, StoreError)]) -> String {
    failed
        .iter()
        .map(|(key, e)| format!("{key} ({e})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Typed access to the settings store.
///
/// Reads never fail: anything missing or unreadable degrades to the
/// document's default. Writes validate first, then upsert every key of the
/// section concurrently. There is no cross-key transaction and no version
/// check, so a failed multi-key save may leave some keys updated, and the
/// last concurrent writer wins.
#[derive(Clone)]
pub struct ContentStore {
    store: Arc<dyn SettingsStore>,
}

impl ContentStore {
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// The raw key-value backend.
    #[must_use]
    pub fn settings(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    /// Hydrate a whole section with one read.
    pub async fn load<S: Section>(&self) -> S {
        let entries = self.fetch(S::KEYS).await;
        S::from_entries(&entries)
    }

    /// Hydrate a single document.
    pub async fn load_document<D: Document>(&self) -> D {
        let entries = self.fetch(&[D::KEY]).await;
        hydrate(&entries)
    }

    /// Validate and write every document of a section.
    ///
    /// # Errors
    ///
    /// Returns `SaveError::Invalid` without writing anything if a document
    /// fails validation, or `SaveError::Store` if any upsert fails.
    pub async fn save<S: Section>(&self, section: &S) -> Result<(), SaveError> {
        let entries = section.to_entries()?;
        self.write_all(entries).await
    }

    /// Validate and write a single document.
    ///
    /// # Errors
    ///
    /// Returns `SaveError` if validation or the upsert fails.
    pub async fn save_document<D: Document>(&self, doc: &D) -> Result<(), SaveError> {
        let entry = encode(doc)?;
        self.write_all(vec![entry]).await
    }

    async fn fetch(&self, keys: &[SettingKey]) -> HashMap<SettingKey, Value> {
        match self.store.select(keys).await {
            Ok(rows) => rows.into_iter().map(|e| (e.key, e.value)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, ?keys, "Settings read failed, using defaults");
                HashMap::new()
            }
        }
    }

    async fn write_all(&self, entries: Vec<(SettingKey, Value)>) -> Result<(), SaveError> {
        let writes = entries.into_iter().map(|(key, value)| async move {
            (key, self.store.upsert(key, value).await)
        });

        let mut committed = Vec::new();
        let mut failed = Vec::new();
        for (key, result) in join_all(writes).await {
            match result {
                Ok(_) => committed.push(key),
                Err(e) => failed.push((key, e)),
            }
        }

        if failed.is_empty() {
            tracing::info!(keys = ?committed, "Settings saved");
            return Ok(());
        }

        if committed.is_empty() {
            tracing::error!(failed = %describe_failures(&failed), "Settings save failed");
        } else {
            tracing::warn!(
                ?committed,
                failed = %describe_failures(&failed),
                "Settings save partially committed"
            );
        }
        Err(SaveError::Store { committed, failed })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::content::{HeroContent, HeroSection, HeroStat, HeroVideo, ListItem, ThemeSection};
    use crate::store::{InMemorySettingsStore, SettingEntry};

    /// Delegates to memory but rejects writes to one key.
    struct RejectingStore {
        inner: InMemorySettingsStore,
        reject: SettingKey,
    }

    #[async_trait]
    impl SettingsStore for RejectingStore {
        async fn select(&self, keys: &[SettingKey]) -> Result<Vec<SettingEntry>, StoreError> {
            self.inner.select(keys).await
        }

        async fn upsert(&self, key: SettingKey, value: Value) -> Result<SettingEntry, StoreError> {
            if key == self.reject {
                return Err(StoreError::Unavailable("write rejected".to_string()));
            }
            self.inner.upsert(key, value).await
        }
    }

    /// Every call fails.
    struct DownStore;

    #[async_trait]
    impl SettingsStore for DownStore {
        async fn select(&self, _keys: &[SettingKey]) -> Result<Vec<SettingEntry>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn upsert(&self, _key: SettingKey, _value: Value) -> Result<SettingEntry, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn memory() -> ContentStore {
        ContentStore::new(Arc::new(InMemorySettingsStore::new()))
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let store = memory();
        let hero: HeroSection = store.load().await;
        assert_eq!(hero, HeroSection::defaults());
    }

    #[tokio::test]
    async fn test_unreachable_store_loads_defaults() {
        let store = ContentStore::new(Arc::new(DownStore));
        let theme: ThemeSection = store.load().await;
        assert_eq!(theme, ThemeSection::defaults());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = memory();
        let mut hero = HeroSection::defaults();
        hero.content.headline = "NEW HEADLINE".to_string();
        hero.stats.truncate(2);

        store.save(&hero).await.unwrap();

        let loaded: HeroSection = store.load().await;
        assert_eq!(loaded, hero);
    }

    #[tokio::test]
    async fn test_saving_twice_is_idempotent() {
        let store = memory();
        let mut hero = HeroSection::defaults();
        hero.content.badge = "Twice".to_string();

        store.save(&hero).await.unwrap();
        store.save(&hero).await.unwrap();

        let loaded: HeroSection = store.load().await;
        assert_eq!(loaded, hero);
        assert_eq!(store.settings().list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_section_writes_nothing() {
        let store = memory();
        let mut theme = ThemeSection::defaults();
        theme.vanta.color = "purple".to_string();

        let err = store.save(&theme).await.unwrap_err();
        assert!(matches!(err, SaveError::Invalid(_)));
        assert!(store.settings().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_committed_key() {
        let store = ContentStore::new(Arc::new(RejectingStore {
            inner: InMemorySettingsStore::new(),
            reject: SettingKey::HeroStats,
        }));

        let mut hero = HeroSection::defaults();
        hero.content.headline = "PARTIAL".to_string();
        hero.stats[0].value = "1+".to_string();

        let err = store.save(&hero).await.unwrap_err();
        assert!(err.is_partial());
        match &err {
            SaveError::Store { committed, failed } => {
                assert_eq!(committed, &[SettingKey::HeroContent]);
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].0, SettingKey::HeroStats);
            }
            SaveError::Invalid(_) => panic!("expected store failure"),
        }

        // No rollback: the content write stands, stats stay at default.
        let loaded: HeroSection = store.load().await;
        assert_eq!(loaded.content.headline, "PARTIAL");
        assert_eq!(loaded.stats, HeroStat::defaults());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = memory();
        let mut first = HeroSection::defaults();
        first.content.tagline = "first".to_string();
        let mut second = HeroSection::defaults();
        second.content.tagline = "second".to_string();

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let loaded: HeroSection = store.load().await;
        assert_eq!(loaded.content.tagline, "second");
    }

    #[tokio::test]
    async fn test_malformed_key_degrades_alone() {
        let store = memory();
        store
            .settings()
            .upsert(SettingKey::HeroContent, json!({"badge": 1}))
            .await
            .unwrap();
        let mut stats = HeroStat::defaults();
        stats.pop();
        store
            .settings()
            .upsert(SettingKey::HeroStats, serde_json::to_value(&stats).unwrap())
            .await
            .unwrap();

        let hero: HeroSection = store.load().await;
        assert_eq!(hero.content, HeroContent::fallback());
        assert_eq!(hero.stats.len(), 3);
    }

    #[tokio::test]
    async fn test_single_document_round_trip() {
        let store = memory();
        let video = HeroVideo {
            url: Some("/uploads/videos/1-abcdefg.mp4".to_string()),
        };
        store.save_document(&video).await.unwrap();
        let loaded: HeroVideo = store.load_document().await;
        assert_eq!(loaded, video);
    }

    #[tokio::test]
    async fn test_total_failure_is_not_partial() {
        let store = ContentStore::new(Arc::new(DownStore));
        let err = store.save(&HeroSection::defaults()).await.unwrap_err();
        assert!(!err.is_partial());
        assert!(err.to_string().contains("hero_content"));
    }
}
