//! Core data types for the Calliope content toolkit.
//!
//! This crate provides the domain value types shared across the Calliope
//! workspace: posting calendars, generated posts, style-learning data, NOTE
//! article plans, and the conversation primitives used when talking to a
//! generation backend. All entities here are request-scoped value objects;
//! persistent identity is assigned only when a document store saves them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod calendar;
mod chat;
mod frequency;
mod limits;
mod note;
mod origin;
mod persona;
mod platform;
mod post;
mod style;
mod time;

pub use calendar::{CalendarData, CalendarPost};
pub use chat::{ChatMessage, Role};
pub use frequency::FrequencySettings;
pub use limits::{
    OVERFLOW_TIME, THREADS_TIME, X_POST_TIMES, article_character_limit,
};
pub use note::{AffiliateInfo, IdeaStatus, NoteIdea, NoteIdeasData, NoteKind};
pub use origin::{Generated, Origin};
pub use persona::PersonaAttributes;
pub use platform::Platform;
pub use post::{GeneratedPost, PostCondition, SavedPost};
pub use style::{GuideKind, LearnedCharacteristics, StyleKind, StyleLearningData};
pub use time::{
    day_of_week_short, days_in_month, end_of_month, new_post_id, parse_month, truncate_chars,
};
