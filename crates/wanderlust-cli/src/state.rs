// SPDX-License-Identifier: AGPL-3.0
// Wanderlust CLI - Application State

use std::path::PathBuf;
use std::sync::Arc;
use wanderlust_core::{
    App, AppError, AppSettings, DestinationCatalog, FileStorage, LikeStore, SettingsStore,
    StaticCatalog,
};

/// Everything a command needs, built once at startup
pub struct AppState {
    pub settings: SettingsStore,
    pub likes: LikeStore,
    pub catalog: Arc<dyn DestinationCatalog>,
}

impl AppState {
    /// Create application state with all stores initialized
    pub async fn new(storage_override: Option<PathBuf>) -> Result<Self, AppError> {
        let settings = SettingsStore::new()?;
        let current = settings.get();

        let storage = match storage_override.or(current.storage_path.clone()) {
            Some(path) => FileStorage::open_at(path).await?,
            None => FileStorage::open().await?,
        };

        let catalog: Arc<dyn DestinationCatalog> = match &current.catalog_path {
            Some(path) => Arc::new(StaticCatalog::load(path)?),
            None => Arc::new(StaticCatalog::builtin()),
        };

        Ok(Self {
            settings,
            likes: LikeStore::new(Arc::new(storage)),
            catalog,
        })
    }

    pub fn current_settings(&self) -> AppSettings {
        self.settings.get()
    }

    /// A fresh navigation shell over the shared stores
    pub fn shell(&self) -> App {
        App::new(
            self.catalog.clone(),
            self.likes.clone(),
            self.current_settings(),
        )
    }
}
