// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Shared logic for all frontends
//
// This crate provides:
// - Destination, AppSettings and AppError types
// - KeyValueStorage with memory and file backends
// - LikeStore for persistent liked destinations
// - DestinationCatalog for feed data
// - CarouselTimer for the splash slides
// - SettingsStore for persistent settings
// - The navigation shell and page state
//
// Frontend-specific code lives in separate crates.

pub mod carousel;
pub mod catalog;
pub mod likes;
pub mod settings;
pub mod shell;
pub mod storage;
pub mod types;

// Re-export commonly used items
pub use carousel::{CarouselTimer, SlideCursor};
pub use catalog::{DestinationCatalog, StaticCatalog};
pub use likes::{like_key, LikeOutcome, LikeStore, LIKE_KEY_PREFIX};
pub use settings::SettingsStore;
pub use shell::{App, Effect, Message};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use types::{AppError, AppSettings, Category, Destination, DestinationId, Slide, UserCount};
