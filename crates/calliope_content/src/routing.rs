//! Task-to-backend routing policy.
//!
//! Which backend a task prefers is a product decision, so the mapping is
//! configuration data rather than orchestrator logic. The default mapping
//! sends quality-sensitive tasks to Claude and cost-sensitive bulk tasks to
//! Gemini.

use crate::BackendCapability;
use calliope_interface::{BackendChoice, BackendKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The discrete generation task types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Full-month posting calendar
    #[display("monthly_calendar")]
    MonthlyCalendar,
    /// One calendar window of up to seven days
    #[display("weekly_calendar")]
    WeeklyCalendar,
    /// Regenerate a single calendar row
    #[display("row_regeneration")]
    RowRegeneration,
    /// A batch of social posts per condition
    #[display("bulk_posts")]
    BulkPosts,
    /// Writing-style analysis from samples
    #[display("style_analysis")]
    StyleAnalysis,
    /// Target-reader persona description
    #[display("persona_description")]
    PersonaDescription,
    /// A month of NOTE article ideas
    #[display("note_ideas")]
    NoteIdeas,
    /// Full NOTE article draft
    #[display("article_draft")]
    ArticleDraft,
    /// Brush-up of an existing article
    #[display("article_revision")]
    ArticleRevision,
    /// Style-guide refinement chat
    #[display("style_guide_chat")]
    StyleGuideChat,
}

/// Preferred backend per task kind.
///
/// Deserializable so deployments can reroute tasks without code changes:
///
/// ```
/// use calliope_content::{TaskKind, TaskRouting};
/// use calliope_interface::BackendKind;
///
/// let routing: TaskRouting =
///     toml::from_str("bulk_posts = \"gemini\"").unwrap();
/// assert_eq!(routing.preferred(TaskKind::BulkPosts), BackendKind::Gemini);
/// // Unlisted tasks keep the default mapping.
/// assert_eq!(routing.preferred(TaskKind::StyleAnalysis), BackendKind::Claude);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRouting {
    overrides: HashMap<TaskKind, BackendKind>,
}

impl TaskRouting {
    /// The preferred backend for a task.
    ///
    /// Falls back to the product default when the task has no override:
    /// calendars, row regeneration and persona descriptions go to Gemini
    /// (cost); everything else goes to Claude (quality).
    pub fn preferred(&self, task: TaskKind) -> BackendKind {
        if let Some(kind) = self.overrides.get(&task) {
            return *kind;
        }
        match task {
            TaskKind::MonthlyCalendar
            | TaskKind::WeeklyCalendar
            | TaskKind::RowRegeneration
            | TaskKind::PersonaDescription => BackendKind::Gemini,
            TaskKind::BulkPosts
            | TaskKind::StyleAnalysis
            | TaskKind::NoteIdeas
            | TaskKind::ArticleDraft
            | TaskKind::ArticleRevision
            | TaskKind::StyleGuideChat => BackendKind::Claude,
        }
    }

    /// Override the preferred backend for one task.
    pub fn route(&mut self, task: TaskKind, backend: BackendKind) {
        self.overrides.insert(task, backend);
    }
}

/// Pick the backend for a task, or `NoBackend` when its preferred provider
/// is not enabled.
///
/// The two backends are never substituted for each other: a disabled
/// preferred backend sends the task straight to the mock generators. Pure
/// function; identical inputs always yield identical output.
pub fn select_backend(
    capability: &BackendCapability,
    task: TaskKind,
    routing: &TaskRouting,
) -> BackendChoice {
    let preferred = routing.preferred(task);
    if capability.enabled(preferred) {
        BackendChoice::Use(preferred)
    } else {
        BackendChoice::NoBackend
    }
}
