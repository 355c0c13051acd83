//! Document and credential storage backends for Calliope.
//!
//! This crate provides pluggable persistence for generated documents
//! (calendars, saved posts, style data, note ideas) and per-user provider
//! tokens. The trait seams live in `calliope_interface`; this crate supplies
//! a filesystem implementation for durable storage and in-memory
//! implementations for tests and single-process use.
//!
//! # Features
//!
//! - **Collection/key addressing**: Documents are stored under
//!   `{collection}/{key}` so callers never touch paths directly
//! - **Atomic writes**: Temp file plus rename keeps partially written
//!   documents from ever being visible
//! - **Pluggable backends**: The same `DocumentStore` trait backs the
//!   filesystem store and the in-memory store
//!
//! # Example
//!
//! ```rust
//! use calliope_interface::DocumentStore;
//! use calliope_storage::FileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::new("/tmp/calliope-data")?;
//! let calendar = serde_json::json!({"month": "2025-03", "posts": []});
//!
//! store.save("calendars", "calendar_2025-03", &calendar).await?;
//! let loaded = store.load("calendars", "calendar_2025-03").await?;
//! assert_eq!(loaded, Some(calendar));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod filesystem;
mod memory;

pub use calliope_error::{StorageError, StorageErrorKind};
pub use credentials::InMemoryCredentials;
pub use filesystem::FileStore;
pub use memory::MemoryStore;
