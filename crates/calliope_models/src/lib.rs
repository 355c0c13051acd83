//! LLM provider integrations for Calliope.
//!
//! This crate provides client implementations for the text-generation
//! providers Calliope routes between, each behind its own feature flag for
//! flexible dependency management.
//!
//! # Available Providers
//!
//! - **Claude** (Anthropic) - Enable with `claude` feature
//! - **Gemini** (Google) - Enable with `gemini` feature
//!
//! # Example
//!
//! ```toml
//! [dependencies]
//! calliope_models = { version = "0.1", features = ["claude"] }
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "claude")]
//! # {
//! use calliope_models::ClaudeClient;
//! use calliope_interface::{CompletionRequest, TextBackend};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClaudeClient::from_env()?;
//! let request = CompletionRequest::from_prompt("Hello");
//! let text = client.complete(&request).await?;
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "claude")]
mod claude;

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "claude")]
pub use claude::{
    ClaudeClient, ClaudeContent, ClaudeContentBlock, ClaudeMessage, ClaudeMessageBuilder,
    ClaudeRequest, ClaudeRequestBuilder, ClaudeResponse, ClaudeUsage,
};

#[cfg(feature = "gemini")]
pub use gemini::{
    GeminiCandidate, GeminiClient, GeminiContent, GeminiGenerationConfig, GeminiPart,
    GeminiRequest, GeminiResponse, GeminiUsage,
};
