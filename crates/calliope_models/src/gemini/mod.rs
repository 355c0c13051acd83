//! Google Gemini API client implementation.
//!
//! This module provides a REST client for the `generateContent` endpoint. It
//! is used for the cost-sensitive generation tasks (monthly and weekly
//! calendars, row regeneration and persona descriptions).

mod client;
mod types;

pub use client::GeminiClient;
pub use types::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse, GeminiUsage,
};
