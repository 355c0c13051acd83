//! Trait definitions for text backends, document storage, and credentials.

use crate::{BackendKind, Caller, CompletionRequest, ProviderTokens};
use async_trait::async_trait;
use calliope_error::CalliopeResult;

/// Core trait that all text-generation backends must implement.
///
/// This provides the minimal interface for a single prompt-in, text-out
/// completion. Callers are responsible for extracting structured data from
/// the returned text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Generate a text completion for the given request.
    async fn complete(&self, req: &CompletionRequest) -> CalliopeResult<String>;

    /// Which provider this backend speaks for.
    fn kind(&self) -> BackendKind;

    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// Trait for persisting generated documents as JSON values.
///
/// Documents are addressed by a collection name and a key within that
/// collection. Implementations decide how those map onto the underlying
/// medium.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Save a document, replacing any existing value under the same key.
    async fn save(
        &self,
        collection: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> CalliopeResult<()>;

    /// Load a document, returning `None` when the key does not exist.
    async fn load(&self, collection: &str, key: &str) -> CalliopeResult<Option<serde_json::Value>>;

    /// Delete a document. Deleting a missing key is not an error.
    async fn delete(&self, collection: &str, key: &str) -> CalliopeResult<()>;

    /// List the keys present in a collection.
    async fn list(&self, collection: &str) -> CalliopeResult<Vec<String>>;
}

/// Trait for looking up per-caller provider tokens.
///
/// A `None` return means the caller has no stored tokens and backends
/// should fall back to process-level credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the tokens stored for a caller, if any.
    async fn tokens_for(&self, caller: &Caller) -> CalliopeResult<Option<ProviderTokens>>;

    /// Store or replace the tokens for a caller.
    async fn store(&self, caller: &Caller, tokens: ProviderTokens) -> CalliopeResult<()>;
}
