//! Filesystem-based document storage implementation.
//!
//! Documents are stored as pretty-printed JSON files in a two-level
//! structure, one directory per collection.

use calliope_error::{CalliopeResult, StorageError, StorageErrorKind};
use calliope_interface::DocumentStore;
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Stores documents as JSON files:
/// `{base_path}/{collection}/{key}.json`
///
/// # Example Structure
///
/// ```text
/// /var/calliope/data/
/// ├── calendars/
/// │   ├── calendar_2025-03.json
/// │   └── calendar_2025-04.json
/// ├── saved_posts/
/// │   └── X_saved.json
/// └── note_ideas/
///     └── 2025-03.json
/// ```
///
/// # Features
///
/// - **Atomic writes**: Uses temp file + rename for atomicity
/// - **Name validation**: Collection and key names never escape the base
///   directory
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for document storage
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> CalliopeResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem document store");
        Ok(Self { base_path })
    }

    /// Reject names that are empty or could escape the base directory.
    fn validate_name(name: &str) -> CalliopeResult<()> {
        let escapes = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');
        if escapes {
            return Err(
                StorageError::new(StorageErrorKind::InvalidKey(name.to_string())).into(),
            );
        }
        Ok(())
    }

    /// Get the filesystem path for a collection and key.
    fn document_path(&self, collection: &str, key: &str) -> PathBuf {
        self.base_path
            .join(collection)
            .join(format!("{}.json", key))
    }

    async fn write_atomic(path: &Path, contents: &str) -> CalliopeResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, contents).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for FileStore {
    #[tracing::instrument(skip(self, value), fields(collection = %collection, key = %key))]
    async fn save(
        &self,
        collection: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> CalliopeResult<()> {
        Self::validate_name(collection)?;
        Self::validate_name(key)?;

        let contents = serde_json::to_string_pretty(value).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string()))
        })?;

        let path = self.document_path(collection, key);
        Self::write_atomic(&path, &contents).await?;

        tracing::debug!(path = %path.display(), "Saved document");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(collection = %collection, key = %key))]
    async fn load(&self, collection: &str, key: &str) -> CalliopeResult<Option<serde_json::Value>> {
        Self::validate_name(collection)?;
        Self::validate_name(key)?;

        let path = self.document_path(collection, key);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let value = serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(Some(value))
    }

    #[tracing::instrument(skip(self), fields(collection = %collection, key = %key))]
    async fn delete(&self, collection: &str, key: &str) -> CalliopeResult<()> {
        Self::validate_name(collection)?;
        Self::validate_name(key)?;

        let path = self.document_path(collection, key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self), fields(collection = %collection))]
    async fn list(&self, collection: &str) -> CalliopeResult<Vec<String>> {
        Self::validate_name(collection)?;

        let dir = self.base_path.join(collection);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
                .into());
            }
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", dir.display(), e)))
        })? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
