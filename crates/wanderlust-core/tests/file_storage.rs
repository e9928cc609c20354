// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use wanderlust_core::{
    Destination, DestinationCatalog, FileStorage, KeyValueStorage, LikeStore, StaticCatalog,
};

fn bali() -> Destination {
    StaticCatalog::builtin()
        .find(&"3".into())
        .expect("builtin catalog has Bali")
}

#[tokio::test]
async fn test_likes_survive_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");

    {
        let storage = Arc::new(FileStorage::open_at(&path).await?);
        let likes = LikeStore::new(storage);
        likes.set_liked(&bali()).await?;
    }

    let storage = Arc::new(FileStorage::open_at(&path).await?);
    let likes = LikeStore::new(storage);
    assert!(likes.is_liked(&bali().id).await);
    assert_eq!(likes.list_all().await, vec![bali()]);

    Ok(())
}

#[tokio::test]
async fn test_like_then_unlike_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let storage = Arc::new(FileStorage::open_at(dir.path().join("storage.json")).await?);
    let likes = LikeStore::new(storage);

    let destination = Destination::new(
        "Bali",
        "https://images.unsplash.com/photo-1519046904884-53103b34b206",
        "Indonesia",
    );
    likes.set_liked(&destination).await?;

    let listed = likes.list_all().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Bali");
    assert_eq!(listed[0].location, "Indonesia");

    likes.set_unliked(&destination.id).await?;
    assert!(likes.list_all().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_corrupt_storage_file_is_set_aside() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");
    let corrupt_path = dir.path().join("storage.json.corrupt");
    // What a write cut off halfway leaves behind
    std::fs::write(&path, r#"{"destination_like_3": "{\"title\":"#)?;

    let storage = FileStorage::open_at(&path).await?;
    assert!(storage.get_all_keys().await?.is_empty());
    assert!(!path.exists());

    storage.set_item("destination_like_1", "{}".into()).await?;
    let reopened = FileStorage::open_at(&path).await?;
    assert_eq!(reopened.get_all_keys().await?, vec!["destination_like_1"]);

    // The damaged data survives the next write untouched
    assert_eq!(
        std::fs::read_to_string(&corrupt_path)?,
        r#"{"destination_like_3": "{\"title\":"#
    );

    Ok(())
}

#[tokio::test]
async fn test_stale_temp_file_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");

    {
        let likes = LikeStore::new(Arc::new(FileStorage::open_at(&path).await?));
        likes.set_liked(&bali()).await?;
    }
    // A crash between writing the temp file and renaming it
    std::fs::write(dir.path().join("storage.json.tmp"), "{ half")?;

    let likes = LikeStore::new(Arc::new(FileStorage::open_at(&path).await?));
    assert_eq!(likes.list_all().await, vec![bali()]);

    likes.set_unliked(&bali().id).await?;
    assert!(!dir.path().join("storage.json.tmp").exists());

    Ok(())
}

#[tokio::test]
async fn test_write_failure_leaves_memory_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.json");
    let storage = Arc::new(FileStorage::open_at(&path).await?);

    // A directory where the file should be makes every write fail
    std::fs::create_dir(&path)?;

    let likes = LikeStore::new(storage.clone());
    assert!(likes.set_liked(&bali()).await.is_err());
    assert!(!likes.is_liked(&bali().id).await);
    assert!(storage.get_all_keys().await?.is_empty());

    Ok(())
}
