//! Process-local settings store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{SettingEntry, SettingKey, SettingsStore, StoreError};

/// Settings held in memory. Used by tests and by local runs without a database.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: RwLock<BTreeMap<SettingKey, SettingEntry>>,
    read_only: AtomicBool,
}

impl InMemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following upsert fail, simulating a rejected write.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn select(&self, keys: &[SettingKey]) -> Result<Vec<SettingEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(keys.iter().filter_map(|k| entries.get(k).cloned()).collect())
    }

    async fn upsert(&self, key: SettingKey, value: Value) -> Result<SettingEntry, StoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is read-only".to_string()));
        }
        let entry = SettingEntry {
            key,
            value,
            updated_at: Utc::now(),
        };
        self.entries.write().await.insert(key, entry.clone());
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<SettingEntry>, StoreError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_select_returns_only_present_keys() {
        let store = InMemorySettingsStore::new();
        store
            .upsert(SettingKey::CtaContent, json!({"headline": "Hi"}))
            .await
            .unwrap();

        let rows = store
            .select(&[SettingKey::CtaContent, SettingKey::HeroContent])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, SettingKey::CtaContent);
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_value() {
        let store = InMemorySettingsStore::new();
        store
            .upsert(SettingKey::SeoSettings, json!({"a": 1, "b": 2}))
            .await
            .unwrap();
        store
            .upsert(SettingKey::SeoSettings, json!({"a": 3}))
            .await
            .unwrap();

        let rows = store.select(&[SettingKey::SeoSettings]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, json!({"a": 3}));
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = InMemorySettingsStore::new();
        let value = json!(["x"]);
        store
            .upsert(SettingKey::NewsItems, value.clone())
            .await
            .unwrap();
        store
            .upsert(SettingKey::NewsItems, value.clone())
            .await
            .unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, value);
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(InMemorySettingsStore::new().ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_read_only_rejects_upserts() {
        let store = InMemorySettingsStore::new();
        store.set_read_only(true);
        assert!(
            store
                .upsert(SettingKey::CtaContent, json!({}))
                .await
                .is_err()
        );
        assert!(store.list().await.unwrap().is_empty());
    }
}
