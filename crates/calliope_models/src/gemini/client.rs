use crate::{GeminiContent, GeminiGenerationConfig, GeminiRequest, GeminiResponse};
use calliope_core::Role;
use calliope_error::{BackendError, CalliopeResult, ConfigError, HttpError, JsonError};
use calliope_interface::{BackendKind, CompletionRequest, TextBackend};
use reqwest::Client;
use tracing::{debug, error, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Google Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google AI Studio API key
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> CalliopeResult<Self> {
        let api_key = api_key.into();
        let model = model.into();
        debug!(model = %model, "Creating new Gemini client");
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

    /// Creates a client from the `GEMINI_API_KEY` and optional `GEMINI_MODEL`
    /// environment variables.
    pub fn from_env() -> CalliopeResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::new("GEMINI_API_KEY not set"))?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    /// Sends a request to the `generateContent` endpoint.
    #[instrument(skip(self, request))]
    pub async fn send(&self, request: &GeminiRequest) -> CalliopeResult<GeminiResponse> {
        debug!("Sending request to Gemini API");

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(
                BackendError::new(format!("Gemini API error ({}): {}", status.as_u16(), body))
                    .into(),
            );
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            JsonError::new(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            candidates = gemini_response.candidates().len(),
            "Received response from Gemini"
        );
        Ok(gemini_response)
    }

    /// Converts a completion request into a `generateContent` request.
    ///
    /// System-role history entries join the explicit system prompt in the
    /// `systemInstruction` field. When the caller asks for JSON-only output
    /// the response MIME type is pinned to `application/json`.
    fn convert_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let mut system_parts: Vec<String> = Vec::new();
        if let Some(system) = request.system() {
            system_parts.push(system.clone());
        }

        let mut contents: Vec<GeminiContent> = Vec::new();
        for msg in request.history() {
            match msg.role {
                Role::System => system_parts.push(msg.content.clone()),
                Role::User => contents.push(GeminiContent::text(Some("user"), &msg.content)),
                Role::Assistant => contents.push(GeminiContent::text(Some("model"), &msg.content)),
            }
        }
        contents.push(GeminiContent::text(Some("user"), request.prompt()));

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiContent::text(None, system_parts.join("\n\n")))
        };

        let generation_config = GeminiGenerationConfig {
            temperature: *request.temperature(),
            max_output_tokens: *request.max_tokens(),
            response_mime_type: request
                .json_only()
                .then(|| "application/json".to_string()),
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(generation_config),
        }
    }
}

#[async_trait::async_trait]
impl TextBackend for GeminiClient {
    fn kind(&self) -> BackendKind {
        BackendKind::Gemini
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request))]
    async fn complete(&self, request: &CompletionRequest) -> CalliopeResult<String> {
        debug!("Generating completion with Gemini");

        let gemini_request = self.convert_request(request);
        let gemini_response = self.send(&gemini_request).await?;
        let text = gemini_response.joined_text();

        if text.is_empty() {
            return Err(BackendError::new("Gemini returned no text content").into());
        }
        Ok(text)
    }
}
