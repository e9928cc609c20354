// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Key-value storage
//
// A small string-keyed, string-valued store with asynchronous access.
// The like store is its only consumer.

use crate::types::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Asynchronous key-value storage service
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read a single value, `None` if the key is absent
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write a value, replacing any previous one
    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError>;

    /// Delete a key. Removing an absent key succeeds.
    async fn remove_item(&self, key: &str) -> Result<(), AppError>;

    /// All stored keys in ascending order
    async fn get_all_keys(&self) -> Result<Vec<String>, AppError>;

    /// Read several keys at once, preserving the order of `keys`
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, AppError> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            pairs.push((key.clone(), self.get_item(key).await?));
        }
        Ok(pairs)
    }
}

/// Volatile storage, mostly for tests and previews
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, AppError> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }
}

/// File-based storage: the whole map lives in one JSON file,
/// rewritten after every mutation
pub struct FileStorage {
    entries: RwLock<BTreeMap<String, String>>,
    file_path: PathBuf,
}

impl FileStorage {
    /// Open the storage file in the default config directory
    pub async fn open() -> Result<Self, AppError> {
        let file_path = crate::settings::config_dir_path()?.join("storage.json");
        Self::open_at(file_path).await
    }

    /// Open (or create on first write) the storage file at `path`
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file_path = path.as_ref().to_path_buf();
        tracing::info!("Storage file path: {:?}", file_path);

        let entries = match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    // Move the damaged file aside so the next write can't replace it
                    let corrupt_path = sibling_path(&file_path, ".corrupt");
                    tracing::warn!(
                        "Failed to parse storage file, moved to {:?} and starting empty: {}",
                        corrupt_path,
                        e
                    );
                    tokio::fs::rename(&file_path, &corrupt_path).await.map_err(|e| {
                        AppError::FileIo(format!("Failed to set aside corrupt storage: {}", e))
                    })?;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::FileIo(format!("Failed to read storage: {}", e)));
            }
        };

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Write entries to a temp file, then rename it over the storage file.
    /// An interrupted write leaves the previous file intact.
    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize storage: {}", e)))?;

        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::FileIo(format!("Failed to create storage dir: {}", e)))?;
        }

        let tmp_path = sibling_path(&self.file_path, ".tmp");
        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|e| AppError::FileIo(format!("Failed to write storage: {}", e)))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.file_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(AppError::FileIo(format!("Failed to replace storage: {}", e)));
        }

        Ok(())
    }
}

/// `storage.json` + `.tmp` -> `storage.json.tmp`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        // Hold the write lock across the disk write so files are never
        // written out of order
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value);

        if let Err(e) = self.persist(&entries).await {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self.entries.write().await;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, AppError> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }
}
