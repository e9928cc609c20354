// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Liked destinations
//
// Each liked destination is stored as its own JSON value under
// `destination_like_<id>`. Nothing is cached: every query goes back to
// the storage service.

use crate::storage::KeyValueStorage;
use crate::types::{AppError, Destination, DestinationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Namespace shared by every like key
pub const LIKE_KEY_PREFIX: &str = "destination_like_";

/// Storage key for a destination's like record
pub fn like_key(id: &DestinationId) -> String {
    format!("{}{}", LIKE_KEY_PREFIX, id)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredLikeRef<'a> {
    #[serde(flatten)]
    destination: &'a Destination,
    liked_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLike {
    #[serde(flatten)]
    destination: Destination,
    #[serde(default)]
    liked_at: Option<DateTime<Utc>>,
}

/// Result of a like toggle, to be applied by the caller once it arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The write went through and `liked` is the new state
    Confirmed { id: DestinationId, liked: bool },
    /// The write failed; `liked` is the state that still holds
    Failed {
        id: DestinationId,
        liked: bool,
        error: String,
    },
}

impl LikeOutcome {
    /// Like state to display after this outcome
    pub fn liked(&self) -> bool {
        match self {
            Self::Confirmed { liked, .. } | Self::Failed { liked, .. } => *liked,
        }
    }

    pub fn id(&self) -> &DestinationId {
        match self {
            Self::Confirmed { id, .. } | Self::Failed { id, .. } => id,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Persistence of liked destinations on top of a key-value storage service
#[derive(Clone)]
pub struct LikeStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl LikeStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Whether a like record exists. Storage errors read as "not liked".
    pub async fn is_liked(&self, id: &DestinationId) -> bool {
        match self.storage.get_item(&like_key(id)).await {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::error!("Failed to load like status for {}: {}", id, e);
                false
            }
        }
    }

    /// Store the full destination record, replacing any previous one with
    /// the same id
    pub async fn set_liked(&self, destination: &Destination) -> Result<(), AppError> {
        if destination.id.is_empty() {
            return Err(AppError::InvalidConfig(format!(
                "Destination {:?} has no id",
                destination.title
            )));
        }

        let stored = StoredLikeRef {
            destination,
            liked_at: Utc::now(),
        };
        let value = serde_json::to_string(&stored)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize like: {}", e)))?;

        self.storage
            .set_item(&like_key(&destination.id), value)
            .await
            .inspect_err(|e| tracing::error!("Failed to save like for {}: {}", destination.id, e))?;

        tracing::info!("Liked {} ({})", destination.title, destination.id);
        Ok(())
    }

    /// Remove the like record
    pub async fn set_unliked(&self, id: &DestinationId) -> Result<(), AppError> {
        self.storage
            .remove_item(&like_key(id))
            .await
            .inspect_err(|e| tracing::error!("Failed to remove like for {}: {}", id, e))?;

        tracing::info!("Unliked {}", id);
        Ok(())
    }

    /// Flip the like state of `destination`, given the state currently shown
    pub async fn toggle(&self, destination: &Destination, currently_liked: bool) -> LikeOutcome {
        let result = if currently_liked {
            self.set_unliked(&destination.id).await
        } else {
            self.set_liked(destination).await
        };

        match result {
            Ok(()) => LikeOutcome::Confirmed {
                id: destination.id.clone(),
                liked: !currently_liked,
            },
            Err(e) => LikeOutcome::Failed {
                id: destination.id.clone(),
                liked: currently_liked,
                error: e.to_string(),
            },
        }
    }

    /// Snapshot of every liked destination, most recently liked first.
    ///
    /// Values that are missing or fail to parse are skipped. A storage
    /// failure yields an empty list.
    pub async fn list_all(&self) -> Vec<Destination> {
        match self.try_list_all().await {
            Ok(destinations) => destinations,
            Err(e) => {
                tracing::error!("Failed to fetch liked destinations: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_list_all(&self) -> Result<Vec<Destination>, AppError> {
        let keys = self.like_keys().await?;
        let pairs = self.storage.multi_get(&keys).await?;

        let mut likes: Vec<StoredLike> = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let Some(value) = value else {
                    tracing::warn!("Like record {} vanished before it could be read", key);
                    return None;
                };
                match serde_json::from_str::<StoredLike>(&value) {
                    Ok(mut stored) => {
                        if stored.destination.id.is_empty() {
                            // Records from before ids existed were keyed by title
                            stored.destination.id =
                                DestinationId::from(&key[LIKE_KEY_PREFIX.len()..]);
                        }
                        Some(stored)
                    }
                    Err(e) => {
                        tracing::warn!("Skipping unreadable like record {}: {}", key, e);
                        None
                    }
                }
            })
            .collect();

        // Option orders None first, so reversing puts undated records last
        likes.sort_by(|a, b| b.liked_at.cmp(&a.liked_at));

        Ok(likes.into_iter().map(|stored| stored.destination).collect())
    }

    /// Number of liked destinations
    pub async fn count(&self) -> usize {
        self.list_all().await.len()
    }

    /// Remove every like record, returning how many were removed
    pub async fn clear(&self) -> Result<usize, AppError> {
        let keys = self.like_keys().await?;
        for key in &keys {
            self.storage.remove_item(key).await?;
        }

        tracing::info!("Cleared {} liked destinations", keys.len());
        Ok(keys.len())
    }

    async fn like_keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self
            .storage
            .get_all_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(LIKE_KEY_PREFIX))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::UserCount;
    use async_trait::async_trait;

    /// Storage whose every call fails
    struct BrokenStorage;

    #[async_trait]
    impl KeyValueStorage for BrokenStorage {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, AppError> {
            Err(AppError::Storage("disk unavailable".into()))
        }

        async fn set_item(&self, _key: &str, _value: String) -> Result<(), AppError> {
            Err(AppError::Storage("disk unavailable".into()))
        }

        async fn remove_item(&self, _key: &str) -> Result<(), AppError> {
            Err(AppError::Storage("disk unavailable".into()))
        }

        async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
            Err(AppError::Storage("disk unavailable".into()))
        }
    }

    /// Lists a like key whose value is already gone, as when an unlike
    /// lands between listing keys and reading them
    struct GhostStorage;

    #[async_trait]
    impl KeyValueStorage for GhostStorage {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, AppError> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: String) -> Result<(), AppError> {
            Ok(())
        }

        async fn remove_item(&self, _key: &str) -> Result<(), AppError> {
            Ok(())
        }

        async fn get_all_keys(&self) -> Result<Vec<String>, AppError> {
            Ok(vec!["destination_like_3".to_string()])
        }
    }

    fn bali() -> Destination {
        Destination::new(
            "Bali",
            "https://images.unsplash.com/photo-1519046904884-53103b34b206",
            "Indonesia",
        )
        .with_id("3")
    }

    fn memory_store() -> (Arc<MemoryStorage>, LikeStore) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), LikeStore::new(storage))
    }

    #[test]
    fn test_like_key() {
        assert_eq!(like_key(&DestinationId::from("3")), "destination_like_3");
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (_, store) = memory_store();
        let destination = bali()
            .with_price("$99")
            .with_users(vec!["https://randomuser.me/api/portraits/men/1.jpg".into()], 12_000);

        store.set_liked(&destination).await.unwrap();

        assert!(store.is_liked(&destination.id).await);
        assert_eq!(store.list_all().await, vec![destination]);
    }

    #[tokio::test]
    async fn test_set_liked_is_idempotent() {
        let (storage, store) = memory_store();
        store.set_liked(&bali()).await.unwrap();
        store.set_liked(&bali()).await.unwrap();

        assert_eq!(storage.len().await, 1);
        assert_eq!(store.list_all().await, vec![bali()]);
    }

    #[tokio::test]
    async fn test_unlike_removes_record() {
        let (_, store) = memory_store();
        store.set_liked(&bali()).await.unwrap();
        store.set_unliked(&bali().id).await.unwrap();

        assert!(!store.is_liked(&bali().id).await);
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_same_id_overwrites() {
        let (_, store) = memory_store();
        let first = bali();
        let second = bali().with_description("Island of the Gods");

        store.set_liked(&first).await.unwrap();
        store.set_liked(&second).await.unwrap();

        assert_eq!(store.list_all().await, vec![second]);
    }

    #[tokio::test]
    async fn test_same_title_different_id_does_not_collide() {
        let (_, store) = memory_store();
        let first = bali();
        let second = bali().with_id("bali-north");

        store.set_liked(&first).await.unwrap();
        store.set_liked(&second).await.unwrap();

        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_skipped() {
        let (storage, store) = memory_store();
        store.set_liked(&bali()).await.unwrap();
        storage
            .set_item("destination_like_broken", "{not json".into())
            .await
            .unwrap();
        storage
            .set_item("unrelated_key", "{}".into())
            .await
            .unwrap();

        assert_eq!(store.list_all().await, vec![bali()]);
    }

    #[tokio::test]
    async fn test_legacy_record_gets_id_from_key() {
        let (storage, store) = memory_store();
        storage
            .set_item(
                "destination_like_Santorini",
                r#"{"title":"Santorini","image":"uri","location":"Greece","rating":4.6}"#.into(),
            )
            .await
            .unwrap();

        let likes = store.list_all().await;
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].id.as_str(), "Santorini");
        assert!(store.is_liked(&likes[0].id).await);
    }

    #[tokio::test]
    async fn test_vanished_record_is_skipped() {
        let store = LikeStore::new(Arc::new(GhostStorage));
        assert!(store.list_all().await.is_empty());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_legacy_string_user_count_and_null_record() {
        let (storage, store) = memory_store();
        storage
            .set_item(
                "destination_like_Bali",
                r#"{"title":"Bali","image":"uri","location":"Indonesia","userCount":"12K","rating":4.7,"price":null}"#
                    .into(),
            )
            .await
            .unwrap();
        storage
            .set_item("destination_like_empty", "null".into())
            .await
            .unwrap();

        let likes = store.list_all().await;
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].user_count, Some(UserCount(12_000)));
        assert_eq!(likes[0].rating.as_deref(), Some("4.7"));
        assert_eq!(likes[0].price, None);
    }

    #[tokio::test]
    async fn test_most_recent_first() {
        let (storage, store) = memory_store();
        let older = bali();
        let newer = Destination::new("Santorini", "uri", "Greece").with_id("2");

        storage
            .set_item(
                &like_key(&older.id),
                serde_json::to_string(&StoredLikeRef {
                    destination: &older,
                    liked_at: Utc::now() - chrono::Duration::hours(1),
                })
                .unwrap(),
            )
            .await
            .unwrap();
        store.set_liked(&newer).await.unwrap();

        let titles: Vec<_> = store.list_all().await.into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["Santorini", "Bali"]);
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let (_, store) = memory_store();
        let destination = bali().with_id("");
        assert!(matches!(
            store.set_liked(&destination).await,
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_toggle_confirms_new_state() {
        let (_, store) = memory_store();

        let outcome = store.toggle(&bali(), false).await;
        assert_eq!(
            outcome,
            LikeOutcome::Confirmed {
                id: bali().id,
                liked: true
            }
        );

        let outcome = store.toggle(&bali(), true).await;
        assert!(outcome.is_confirmed());
        assert!(!outcome.liked());
        assert!(!store.is_liked(&bali().id).await);
    }

    #[tokio::test]
    async fn test_storage_failures_degrade() {
        let store = LikeStore::new(Arc::new(BrokenStorage));

        assert!(!store.is_liked(&bali().id).await);
        assert!(store.list_all().await.is_empty());
        assert!(store.set_liked(&bali()).await.is_err());
        assert!(store.set_unliked(&bali().id).await.is_err());
        assert!(store.clear().await.is_err());

        let outcome = store.toggle(&bali(), false).await;
        assert!(!outcome.is_confirmed());
        assert!(!outcome.liked());
    }

    #[tokio::test]
    async fn test_clear_only_touches_likes() {
        let (storage, store) = memory_store();
        store.set_liked(&bali()).await.unwrap();
        storage.set_item("other", "1".into()).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 1);
        assert_eq!(storage.get_all_keys().await.unwrap(), vec!["other"]);
    }
}
