//! Trait definitions for the Calliope content toolkit.
//!
//! This crate holds the seams between the generation pipeline and its
//! collaborators: the two text-generation backends, the JSON document store,
//! and the per-user credential store. The orchestrator depends only on these
//! traits; concrete providers live in `calliope_models` and concrete stores
//! in `calliope_storage`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{CredentialStore, DocumentStore, TextBackend};
pub use types::{
    BackendChoice, BackendKind, Caller, CompletionRequest, CompletionRequestBuilder,
    ProviderTokens,
};
