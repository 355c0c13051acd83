//! Request and response DTOs for the Gemini `generateContent` endpoint.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single text part in a Gemini content entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text payload.
    #[serde(default)]
    pub text: String,
}

/// One content entry in a Gemini conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Entry role, "user" or "model". Absent for system instructions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Parts making up the entry.
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Convenience constructor for a single-part entry.
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

/// Generation tuning parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Optional sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Response MIME type, "application/json" to force JSON output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation contents.
    pub contents: Vec<GeminiContent>,
    /// Optional system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    /// Optional generation configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    prompt_token_count: u32,
    /// Tokens produced across candidates.
    #[serde(default)]
    candidates_token_count: u32,
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content.
    content: GeminiContent,
    /// Why generation stopped.
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Response body from `generateContent`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidate completions, usually exactly one.
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    /// Token accounting.
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

impl GeminiResponse {
    /// Concatenate the text parts of the first candidate.
    pub fn joined_text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content()
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
