//! `PostgreSQL` settings store over the `site_settings` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{SettingEntry, SettingKey, SettingsStore, StoreError};

#[derive(sqlx::FromRow)]
struct SettingRow {
    key: String,
    value: Json<Value>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SettingRow> for SettingEntry {
    type Error = StoreError;

    fn try_from(row: SettingRow) -> Result<Self, Self::Error> {
        let key = row
            .key
            .parse()
            .map_err(|e| StoreError::DataCorruption(format!("{e}")))?;
        Ok(Self {
            key,
            value: row.value.0,
            updated_at: row.updated_at,
        })
    }
}

/// Settings store backed by `site_settings(key, value JSONB, updated_at)`.
#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SettingsStore for PgSettingsStore {
    async fn select(&self, keys: &[SettingKey]) -> Result<Vec<SettingEntry>, StoreError> {
        let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        let rows: Vec<SettingRow> = sqlx::query_as(
            r"
            SELECT key, value, updated_at
            FROM site_settings
            WHERE key = ANY($1)
            ",
        )
        .bind(&keys)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SettingEntry::try_from).collect()
    }

    async fn upsert(&self, key: SettingKey, value: Value) -> Result<SettingEntry, StoreError> {
        let row: SettingRow = sqlx::query_as(
            r"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING key, value, updated_at
            ",
        )
        .bind(key.as_str())
        .bind(Json(&value))
        .fetch_one(&self.pool)
        .await?;

        SettingEntry::try_from(row)
    }

    async fn list(&self) -> Result<Vec<SettingEntry>, StoreError> {
        let rows: Vec<SettingRow> =
            sqlx::query_as("SELECT key, value, updated_at FROM site_settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?;

        // Rows written outside the vocabulary are skipped, not fatal.
        Ok(rows
            .into_iter()
            .filter_map(|row| match SettingEntry::try_from(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unrecognized settings row");
                    None
                }
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
