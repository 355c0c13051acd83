//! Calliope - Content operations studio.
//!
//! Calliope generates monthly posting calendars, social post batches, style
//! analyses, personas, and NOTE article material through pluggable LLM
//! backends, falling back to deterministic mock generators whenever a
//! backend is unavailable or misbehaves. Callers always get a well-formed
//! result.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use calliope::{BackendCapability, ContentStudio, FrequencySettings};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = ContentStudio::builder().build();
//!     let capability = BackendCapability::from_env();
//!     let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//!     let calendar = studio
//!         .generate_calendar(&capability, start, &FrequencySettings::default(), None)
//!         .await?;
//!     println!("{} posts ({})", calendar.value.posts.len(), calendar.origin);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `claude` - Anthropic Claude backend (quality-oriented tasks)
//! - `gemini` - Google Gemini backend (cost-oriented tasks)
//!
//! # Architecture
//!
//! Calliope is organized as a workspace with focused crates:
//!
//! - `calliope_core` - Domain types (calendars, posts, styles, ideas)
//! - `calliope_interface` - `TextBackend` and storage trait seams
//! - `calliope_error` - Error types
//! - `calliope_models` - Provider wire clients
//! - `calliope_storage` - Document and credential stores
//! - `calliope_content` - Routing, extraction, mocks, and the orchestrator
//!
//! This crate (`calliope`) re-exports everything for convenience.

#![forbid(unsafe_code)]

// Re-export core crates (always available)
pub use calliope_content::*;
pub use calliope_core::*;
pub use calliope_error::*;
pub use calliope_interface::*;
pub use calliope_storage::*;

// Re-export provider clients based on features
#[cfg(any(feature = "claude", feature = "gemini"))]
pub use calliope_models::*;
