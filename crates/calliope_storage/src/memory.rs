//! In-memory document storage for tests and single-process deployments.

use calliope_error::{CalliopeResult, StorageError, StorageErrorKind};
use calliope_interface::DocumentStore;
use std::collections::HashMap;
use std::sync::RwLock;

type Collections = HashMap<String, HashMap<String, serde_json::Value>>;

/// In-memory storage backend.
///
/// Holds every document in a process-local map. Nothing survives a restart;
/// use [`crate::FileStore`] for durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_read(&self) -> CalliopeResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.collections.read().map_err(|_| {
            StorageError::new(StorageErrorKind::Unavailable("lock poisoned".to_string())).into()
        })
    }

    fn lock_write(&self) -> CalliopeResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections.write().map_err(|_| {
            StorageError::new(StorageErrorKind::Unavailable("lock poisoned".to_string())).into()
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn save(
        &self,
        collection: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> CalliopeResult<()> {
        let mut collections = self.lock_write()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn load(&self, collection: &str, key: &str) -> CalliopeResult<Option<serde_json::Value>> {
        let collections = self.lock_read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn delete(&self, collection: &str, key: &str) -> CalliopeResult<()> {
        let mut collections = self.lock_write()?;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> CalliopeResult<Vec<String>> {
        let collections = self.lock_read()?;
        let mut keys: Vec<String> = collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_delete_round_trip() {
        let store = MemoryStore::new();
        let doc = serde_json::json!({"month": "2025-03"});

        store.save("calendars", "calendar_2025-03", &doc).await.unwrap();
        assert_eq!(
            store.load("calendars", "calendar_2025-03").await.unwrap(),
            Some(doc)
        );

        store.delete("calendars", "calendar_2025-03").await.unwrap();
        assert_eq!(
            store.load("calendars", "calendar_2025-03").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn list_returns_sorted_keys() {
        let store = MemoryStore::new();
        let doc = serde_json::json!({});
        store.save("notes", "b", &doc).await.unwrap();
        store.save("notes", "a", &doc).await.unwrap();

        assert_eq!(store.list("notes").await.unwrap(), vec!["a", "b"]);
        assert!(store.list("missing").await.unwrap().is_empty());
    }
}
