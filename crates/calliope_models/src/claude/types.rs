//! Request and response DTOs for the Anthropic Messages API.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single content block in a Claude message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentBlock {
    /// Plain text content.
    Text {
        /// The text payload.
        text: String,
    },
}

/// A message in a Claude conversation.
#[derive(Debug, Clone, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ClaudeMessage {
    /// Message role, "user" or "assistant".
    pub role: String,
    /// Content blocks for the message.
    pub content: Vec<ClaudeContentBlock>,
}

impl ClaudeMessage {
    /// Create a builder for a message.
    pub fn builder() -> ClaudeMessageBuilder {
        ClaudeMessageBuilder::default()
    }

    /// Convenience constructor for a single-text-block message.
    pub fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: vec![ClaudeContentBlock::Text { text: text.into() }],
        }
    }
}

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ClaudeRequest {
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<ClaudeMessage>,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub system: Option<String>,
    /// Optional sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub temperature: Option<f32>,
}

impl ClaudeRequest {
    /// Create a builder for a request.
    pub fn builder() -> ClaudeRequestBuilder {
        ClaudeRequestBuilder::default()
    }
}

/// A content block in a Claude response.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ClaudeContent {
    /// Block type, "text" for text output.
    #[serde(rename = "type")]
    kind: String,
    /// Text payload.
    #[serde(default)]
    text: String,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ClaudeUsage {
    /// Tokens consumed by the input.
    input_tokens: u32,
    /// Tokens produced in the output.
    output_tokens: u32,
}

/// Response body from the Messages API.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ClaudeResponse {
    /// Response identifier.
    id: String,
    /// Model that produced the response.
    model: String,
    /// Generated content blocks.
    content: Vec<ClaudeContent>,
    /// Why generation stopped.
    #[serde(default)]
    stop_reason: Option<String>,
    /// Token accounting.
    usage: ClaudeUsage,
}

impl ClaudeResponse {
    /// Concatenate the text of all content blocks.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.kind() == "text")
            .map(|block| block.text().as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}
