//! Anthropic Claude API client implementation.
//!
//! This module provides a REST client for the Anthropic Messages API. It is
//! used for the quality-sensitive generation tasks (bulk posts, style
//! analysis, note ideas, article drafting and the style-guide chat).

mod client;
mod types;

pub use client::ClaudeClient;
pub use types::{
    ClaudeContent, ClaudeContentBlock, ClaudeMessage, ClaudeMessageBuilder, ClaudeRequest,
    ClaudeRequestBuilder, ClaudeResponse, ClaudeUsage,
};
