//! Tests for the filesystem document store.

use calliope_interface::DocumentStore;
use calliope_storage::FileStore;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let calendar = serde_json::json!({
        "month": "2025-03",
        "posts": [{"date": "2025-03-01", "platform": "X"}],
    });

    store
        .save("calendars", "calendar_2025-03", &calendar)
        .await
        .unwrap();

    let loaded = store.load("calendars", "calendar_2025-03").await.unwrap();
    assert_eq!(loaded, Some(calendar));

    // File lands under {base}/{collection}/{key}.json
    let path = temp_dir
        .path()
        .join("calendars")
        .join("calendar_2025-03.json");
    assert!(path.exists());
}

#[tokio::test]
async fn test_load_missing_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let loaded = store.load("calendars", "calendar_2099-01").await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn test_save_overwrites_existing() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let first = serde_json::json!({"version": 1});
    let second = serde_json::json!({"version": 2});

    store.save("style", "x", &first).await.unwrap();
    store.save("style", "x", &second).await.unwrap();

    let loaded = store.load("style", "x").await.unwrap();
    assert_eq!(loaded, Some(second));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let doc = serde_json::json!({"kind": "note"});
    store.save("note_ideas", "ideas_2025-03", &doc).await.unwrap();

    store.delete("note_ideas", "ideas_2025-03").await.unwrap();
    assert_eq!(store.load("note_ideas", "ideas_2025-03").await.unwrap(), None);

    // Deleting again is not an error
    store.delete("note_ideas", "ideas_2025-03").await.unwrap();
}

#[tokio::test]
async fn test_list_collection_keys() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let doc = serde_json::json!({});
    store.save("calendars", "calendar_2025-04", &doc).await.unwrap();
    store.save("calendars", "calendar_2025-03", &doc).await.unwrap();

    let keys = store.list("calendars").await.unwrap();
    assert_eq!(keys, vec!["calendar_2025-03", "calendar_2025-04"]);

    let empty = store.list("saved_posts").await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_rejects_path_escaping_names() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path()).unwrap();

    let doc = serde_json::json!({});
    assert!(store.save("calendars", "../escape", &doc).await.is_err());
    assert!(store.save("a/b", "key", &doc).await.is_err());
    assert!(store.save("calendars", "", &doc).await.is_err());
    assert!(store.load("calendars", "..").await.is_err());
}
