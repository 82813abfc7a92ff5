//! Inspect the settings store.
//!
//! # Usage
//!
//! ```bash
//! bm-cli settings list
//! bm-cli settings show hero_content
//! ```

use brand_mappers_core::store::{PgSettingsStore, SettingKey, SettingsStore};

use super::{CommandError, connect};

/// Print every known key with its last update, marking unset keys.
///
/// # Errors
///
/// Returns `CommandError` if the store cannot be read.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let store = PgSettingsStore::new(connect().await?);
    let entries = store.list().await?;

    for key in SettingKey::ALL {
        match entries.iter().find(|e| e.key == key) {
            Some(entry) => println!("{:<22} {}", key.as_str(), entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
            None => println!("{:<22} (default)", key.as_str()),
        }
    }
    Ok(())
}

/// Print one stored value as pretty JSON.
///
/// # Errors
///
/// Returns `CommandError` for an unknown key or a failed read.
#[allow(clippy::print_stdout)]
pub async fn show(key: &str) -> Result<(), CommandError> {
    let key: SettingKey = key
        .parse()
        .map_err(|e| CommandError::Invalid(format!("{e}")))?;
    let store = PgSettingsStore::new(connect().await?);
    let entries = store.select(&[key]).await?;

    match entries.first() {
        Some(entry) => {
            let pretty = serde_json::to_string_pretty(&entry.value)
                .map_err(|e| CommandError::Invalid(e.to_string()))?;
            println!("{pretty}");
        }
        None => println!("{key} is not set; the site uses its default."),
    }
    Ok(())
}
