// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Settings persistence
//
// Settings are stored in a local JSON file next to the like storage.

use crate::types::{AppError, AppSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Where the per-user config directory lives. Nothing is created; async
/// callers create it with `tokio::fs` when they first write.
pub fn config_dir_path() -> Result<PathBuf, AppError> {
    directories::ProjectDirs::from("app", "wanderlust", "wanderlust")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))
}

/// Per-user config directory, created if missing
pub fn config_dir() -> Result<PathBuf, AppError> {
    let config_dir = config_dir_path()?;
    fs::create_dir_all(&config_dir)
        .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
    Ok(config_dir)
}

/// Current settings, mirrored to `settings.json` on every update
pub struct SettingsStore {
    settings: RwLock<AppSettings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Open `settings.json` in the per-user config directory
    pub fn new() -> Result<Self, AppError> {
        Self::open_at(config_dir()?.join("settings.json"))
    }

    /// Load settings from `path`, writing defaults there if it does not exist
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file_path = path.as_ref().to_path_buf();
        tracing::info!("Settings file path: {:?}", file_path);

        let settings = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                AppSettings::default()
            })
        } else {
            tracing::info!("First run, using default settings");
            AppSettings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        if !store.file_path.exists() {
            store.persist()?;
        }

        Ok(store)
    }

    fn persist(&self) -> Result<(), AppError> {
        let content = {
            let settings = self.read();
            serde_json::to_string_pretty(&*settings).map_err(|e| {
                AppError::Serialization(format!("Failed to serialize settings: {}", e))
            })?
        };

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
        }

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AppSettings> {
        // A poisoned lock still holds a complete settings value
        self.settings.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self) -> AppSettings {
        self.read().clone()
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Replace the settings; the in-memory value changes even if the write fails
    pub fn update(&self, new_settings: AppSettings) -> Result<(), AppError> {
        tracing::info!(
            "Updating settings, default category: {}",
            new_settings.default_category
        );
        {
            let mut settings = self.settings.write().unwrap_or_else(|e| e.into_inner());
            *settings = new_settings;
        }

        self.persist().inspect_err(|e| {
            tracing::error!("Could not write {:?}: {}", self.file_path, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.get(), AppSettings::default());
    }

    #[test]
    fn test_update_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::open_at(&path).unwrap();
        let mut settings = store.get();
        settings.default_category = Category::Mountain;
        settings.carousel_interval_ms = 1500;
        store.update(settings.clone()).unwrap();

        let reopened = SettingsStore::open_at(&path).unwrap();
        assert_eq!(reopened.get(), settings);
    }

    #[test]
    fn test_config_dir_path_names_the_app() {
        // Hosts without a home directory have no config dir at all
        if let Ok(path) = config_dir_path() {
            let name = path.file_name().unwrap().to_string_lossy().to_lowercase();
            assert!(name.contains("wanderlust"));
        }
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ nope").unwrap();

        let store = SettingsStore::open_at(&path).unwrap();
        assert_eq!(store.get(), AppSettings::default());
    }
}
