//! Generation pipeline for Calliope.
//!
//! This crate holds the pieces that turn a generation request into a
//! well-formed result: environment-derived backend capability, task-to-backend
//! routing, JSON extraction and repair for free-form model output, the
//! deterministic mock generators, and the [`ContentStudio`] orchestrator that
//! ties them together. The orchestrator never surfaces a backend failure to
//! its caller; every failed attempt falls back to the mocks.
//!
//! # Example
//!
//! ```no_run
//! use calliope_content::{BackendCapability, ContentStudio};
//! use calliope_core::FrequencySettings;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let studio = ContentStudio::builder().build();
//! let capability = BackendCapability::from_env();
//! let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//! let calendar = studio
//!     .generate_calendar(&capability, start, &FrequencySettings::default(), None)
//!     .await?;
//! println!("{} posts ({})", calendar.value.posts.len(), calendar.origin);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod extraction;
mod guide;
mod library;
mod mock;
mod prompt;
mod routing;
mod studio;

pub use capability::BackendCapability;
pub use extraction::{Shape, extract_structured, extract_typed};
pub use guide::{ChatOutcome, OFFLINE_CHAT_MESSAGE, split_guide_update};
pub use library::ContentLibrary;
pub use mock::{
    mock_article, mock_brush_up, mock_calendar, mock_note_ideas, mock_persona, mock_posts,
    mock_row, mock_style_characteristics, mock_week_calendar,
};
pub use routing::{TaskKind, TaskRouting, select_backend};
pub use studio::{ContentStudio, ContentStudioBuilder};
