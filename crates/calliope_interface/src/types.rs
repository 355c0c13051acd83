//! Shared types for the backend and storage seams.

use calliope_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// The two generation backend providers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Anthropic Claude; preferred for quality-oriented tasks
    #[display("claude")]
    Claude,
    /// Google Gemini; preferred for cost-oriented and bulk tasks
    #[display("gemini")]
    Gemini,
}

/// Outcome of backend selection for one task.
///
/// The two backends are never substituted for each other: when the preferred
/// provider is not enabled the choice is `NoBackend` and the caller goes
/// straight to the mock generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendChoice {
    /// Invoke this backend
    Use(BackendKind),
    /// No backend configured for the task; use mocks
    NoBackend,
}

/// The authenticated identity behind a request, or anonymous.
///
/// Anonymous callers skip optional per-user integrations (credential lookup,
/// cloud persistence); anonymity is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Caller {
    /// A stable user identifier
    User(String),
    /// No authenticated identity
    Anonymous,
}

impl Caller {
    /// The user id, when authenticated.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Caller::User(id) => Some(id),
            Caller::Anonymous => None,
        }
    }
}

/// Stored external-provider tokens for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderTokens {
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token, when the provider issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// A text-completion request to a generation backend.
///
/// # Examples
///
/// ```
/// use calliope_interface::CompletionRequest;
///
/// let request = CompletionRequest::builder()
///     .prompt("JSON配列のみ出力".to_string())
///     .json_only(true)
///     .build()
///     .unwrap();
/// assert!(*request.json_only());
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(default, setter(into))]
pub struct CompletionRequest {
    /// The prompt to complete
    prompt: String,
    /// Optional system instruction
    system: Option<String>,
    /// Prior conversation turns, oldest first
    history: Vec<ChatMessage>,
    /// Maximum tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Ask the provider for a JSON-only response mode where supported
    json_only: bool,
}

impl CompletionRequest {
    /// Start building a request.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// A plain single-prompt request.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}
