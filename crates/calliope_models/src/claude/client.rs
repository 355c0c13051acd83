use crate::{ClaudeMessage, ClaudeRequest, ClaudeResponse};
use calliope_core::Role;
use calliope_error::{
    BackendError, CalliopeResult, ConfigError, HttpError, JsonError, ValidationError,
};
use calliope_interface::{BackendKind, CompletionRequest, TextBackend};
use reqwest::Client;
use tracing::{debug, error, instrument};

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Anthropic Claude API client.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeClient {
    /// Creates a new Claude client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-sonnet-4-20250514")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> CalliopeResult<Self> {
        let api_key = api_key.into();
        let model = model.into();
        debug!(model = %model, "Creating new Claude client");
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Creates a client from the `CLAUDE_API_KEY` and optional `CLAUDE_MODEL`
    /// environment variables.
    pub fn from_env() -> CalliopeResult<Self> {
        let api_key = std::env::var("CLAUDE_API_KEY")
            .map_err(|_| ConfigError::new("CLAUDE_API_KEY not set"))?;
        let model = std::env::var("CLAUDE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Sends a request to the Messages API.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn send(&self, request: &ClaudeRequest) -> CalliopeResult<ClaudeResponse> {
        debug!("Sending request to Claude API");

        let response = self
            .client
            .post(CLAUDE_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Claude API");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Claude API returned error");
            return Err(
                BackendError::new(format!("Claude API error ({}): {}", status.as_u16(), body))
                    .into(),
            );
        }

        let claude_response: ClaudeResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Claude response");
            JsonError::new(format!("Failed to parse response: {}", e))
        })?;

        debug!(response_id = %claude_response.id(), "Received response from Claude");
        Ok(claude_response)
    }

    /// Converts a completion request into a Messages API request.
    ///
    /// System-role history entries are folded into the `system` parameter
    /// since the Messages API does not accept them in `messages`.
    fn convert_request(&self, request: &CompletionRequest) -> CalliopeResult<ClaudeRequest> {
        let mut system_parts: Vec<String> = Vec::new();
        if let Some(system) = request.system() {
            system_parts.push(system.clone());
        }

        let mut messages: Vec<ClaudeMessage> = Vec::new();
        for msg in request.history() {
            match msg.role {
                Role::System => system_parts.push(msg.content.clone()),
                Role::User => messages.push(ClaudeMessage::text("user", &msg.content)),
                Role::Assistant => messages.push(ClaudeMessage::text("assistant", &msg.content)),
            }
        }
        messages.push(ClaudeMessage::text("user", request.prompt()));

        let mut builder = ClaudeRequest::builder();
        builder
            .model(&self.model)
            .max_tokens(request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS))
            .messages(messages);
        if !system_parts.is_empty() {
            builder.system(Some(system_parts.join("\n\n")));
        }
        if let Some(temp) = request.temperature() {
            builder.temperature(Some(*temp));
        }

        builder
            .build()
            .map_err(|e| ValidationError::new(e.to_string()).into())
    }
}

#[async_trait::async_trait]
impl TextBackend for ClaudeClient {
    fn kind(&self) -> BackendKind {
        BackendKind::Claude
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request))]
    async fn complete(&self, request: &CompletionRequest) -> CalliopeResult<String> {
        debug!("Generating completion with Claude");

        let claude_request = self.convert_request(request)?;
        let claude_response = self.send(&claude_request).await?;
        let text = claude_response.joined_text();

        if text.is_empty() {
            return Err(BackendError::new("Claude returned no text content").into());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calliope_core::ChatMessage;

    #[test]
    fn converts_prompt_and_system() {
        let client = ClaudeClient::new("test-key", "claude-sonnet-4-20250514").unwrap();
        let request = CompletionRequest::builder()
            .prompt("Generate a calendar")
            .system(Some("You are a content planner".to_string()))
            .build()
            .unwrap();

        let converted = client.convert_request(&request).unwrap();
        assert_eq!(converted.model, "claude-sonnet-4-20250514");
        assert_eq!(converted.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(converted.messages.len(), 1);
        assert_eq!(converted.messages[0].role, "user");
        assert_eq!(
            converted.system.as_deref(),
            Some("You are a content planner")
        );
    }

    #[test]
    fn folds_system_history_into_system_param() {
        let client = ClaudeClient::new("test-key", "claude-sonnet-4-20250514").unwrap();
        let request = CompletionRequest::builder()
            .prompt("Continue")
            .history(vec![
                ChatMessage::now(Role::System, "Ground rules"),
                ChatMessage::now(Role::User, "Hello"),
                ChatMessage::now(Role::Assistant, "Hi there"),
            ])
            .build()
            .unwrap();

        let converted = client.convert_request(&request).unwrap();
        assert_eq!(converted.system.as_deref(), Some("Ground rules"));
        let roles: Vec<&str> = converted.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[test]
    fn request_serializes_without_empty_options() {
        let request = ClaudeRequest::builder()
            .model("claude-sonnet-4-20250514")
            .max_tokens(1024u32)
            .messages(vec![ClaudeMessage::text("user", "hi")])
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
    }
}
