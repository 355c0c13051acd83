//! The generation orchestrator.
//!
//! Every operation follows the same shape: validate inputs, pick a backend,
//! render the prompt, call the backend, extract and repair the response, map
//! it to a typed result, and on any attempt failure fall back to the mock
//! generators. Callers always receive a well-formed result; the only errors
//! this module surfaces are input-validation failures raised before
//! dispatch.

use crate::guide::{ChatOutcome, OFFLINE_CHAT_MESSAGE, split_guide_update};
use crate::mock::{
    mock_article, mock_brush_up, mock_note_ideas, mock_persona, mock_posts, mock_row,
    mock_style_characteristics, mock_week_calendar,
};
use crate::routing::{TaskKind, TaskRouting, select_backend};
use crate::{BackendCapability, Shape, extract_typed, prompt};
use calliope_core::{
    CalendarData, CalendarPost, ChatMessage, FrequencySettings, Generated, GeneratedPost,
    GuideKind, IdeaStatus, LearnedCharacteristics, NoteIdea, NoteIdeasData, NoteKind, Origin,
    PersonaAttributes, Platform, PostCondition, StyleKind, StyleLearningData, day_of_week_short,
    days_in_month, end_of_month, new_post_id,
};
use calliope_error::{CalliopeResult, ValidationError};
use calliope_interface::{
    BackendChoice, BackendKind, Caller, CompletionRequest, CredentialStore, DocumentStore,
    TextBackend,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Wire shape of one post in a bulk-generation response.
#[derive(Debug, Deserialize)]
struct WirePost {
    content: String,
    #[serde(default)]
    hashtags: Vec<String>,
}

/// Orchestrates generation tasks across backends, mocks, and persistence.
///
/// Construct through [`ContentStudio::builder`]. Backends are injected per
/// provider; a studio with no backends is fully functional and serves every
/// task from the mocks. Capability is passed per call so that environment
/// changes take effect without rebuilding the studio.
pub struct ContentStudio {
    routing: TaskRouting,
    caller: Caller,
    backends: HashMap<BackendKind, Arc<dyn TextBackend>>,
    documents: Option<Arc<dyn DocumentStore>>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

/// Builder for [`ContentStudio`].
#[derive(Default)]
pub struct ContentStudioBuilder {
    routing: TaskRouting,
    caller: Option<Caller>,
    backends: HashMap<BackendKind, Arc<dyn TextBackend>>,
    documents: Option<Arc<dyn DocumentStore>>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl ContentStudioBuilder {
    /// Replace the default task routing.
    pub fn routing(mut self, routing: TaskRouting) -> Self {
        self.routing = routing;
        self
    }

    /// Set the caller the studio acts for. Defaults to anonymous.
    pub fn caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Register a backend for its provider kind.
    pub fn backend(mut self, backend: Arc<dyn TextBackend>) -> Self {
        self.backends.insert(backend.kind(), backend);
        self
    }

    /// Attach a document store for best-effort persistence.
    pub fn documents(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(store);
        self
    }

    /// Attach a credential store for per-user storage namespacing.
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Build the studio.
    pub fn build(self) -> ContentStudio {
        ContentStudio {
            routing: self.routing,
            caller: self.caller.unwrap_or(Caller::Anonymous),
            backends: self.backends,
            documents: self.documents,
            credentials: self.credentials,
        }
    }
}

impl ContentStudio {
    /// Start building a studio.
    pub fn builder() -> ContentStudioBuilder {
        ContentStudioBuilder::default()
    }

    /// One backend attempt for a task. `None` means the attempt failed or no
    /// backend applies; the caller proceeds to its mock.
    async fn attempt(
        &self,
        capability: &BackendCapability,
        task: TaskKind,
        request: &CompletionRequest,
    ) -> Option<String> {
        let kind = match select_backend(capability, task, &self.routing) {
            BackendChoice::Use(kind) => kind,
            BackendChoice::NoBackend => {
                debug!(%task, "no backend enabled, using mocks");
                return None;
            }
        };
        let Some(backend) = self.backends.get(&kind) else {
            warn!(%task, %kind, "backend enabled but not registered");
            return None;
        };
        match backend.complete(request).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(%task, %kind, %error, "backend attempt failed");
                None
            }
        }
    }

    /// Resolve the storage collection for the current caller.
    ///
    /// Authenticated callers whose provider tokens resolve get a per-user
    /// namespace; anonymous callers and failed lookups use the shared one.
    async fn collection_for(&self, collection: &str) -> String {
        let (Some(credentials), Some(user_id)) = (&self.credentials, self.caller.user_id()) else {
            return collection.to_string();
        };
        match credentials.tokens_for(&self.caller).await {
            Ok(Some(_)) => format!("{collection}_{user_id}"),
            Ok(None) => collection.to_string(),
            Err(error) => {
                warn!(%error, "credential lookup failed, using shared namespace");
                collection.to_string()
            }
        }
    }

    /// Best-effort persistence. Failures are logged and swallowed.
    async fn persist<T: Serialize>(&self, collection: &str, key: &str, value: &T) {
        let Some(store) = &self.documents else {
            return;
        };
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(error) => {
                warn!(collection, key, %error, "failed to serialize document");
                return;
            }
        };
        let collection = self.collection_for(collection).await;
        if let Err(error) = store.save(&collection, key, &value).await {
            warn!(collection, key, %error, "failed to persist document");
        }
    }

    /// Generate a full-month posting calendar.
    ///
    /// The month is decomposed into seven-day windows (the final window may
    /// be shorter), each generated independently. A window whose backend
    /// attempt fails falls back to the mock for that window only, so a
    /// partially backend-sourced calendar is a normal outcome. The result is
    /// backend-origin when at least one window came from a backend.
    #[instrument(skip_all, fields(start = %start))]
    pub async fn generate_calendar(
        &self,
        capability: &BackendCapability,
        start: NaiveDate,
        settings: &FrequencySettings,
        style: Option<&LearnedCharacteristics>,
    ) -> CalliopeResult<Generated<CalendarData>> {
        let month_start = start
            .with_day(1)
            .ok_or_else(|| ValidationError::new("invalid start date"))?;
        let last_day = days_in_month(month_start);

        let mut posts = Vec::new();
        let mut any_backend = false;
        let mut week_start = 1u32;
        while week_start <= last_day {
            let week_end = (week_start + 6).min(last_day);
            let window = self
                .calendar_window(
                    capability,
                    TaskKind::MonthlyCalendar,
                    month_start,
                    week_start,
                    week_end,
                    settings,
                    style,
                )
                .await?;
            any_backend |= window.origin == Origin::Backend;
            posts.extend(window.value);
            week_start += 7;
        }
        posts.sort_by_key(|post| post.date);

        let data = CalendarData {
            calendar_id: CalendarData::id_for(month_start),
            start_date: month_start,
            end_date: end_of_month(month_start),
            frequency_settings: settings.clone(),
            posts,
        };
        self.persist("calendars", &data.calendar_id, &data).await;

        Ok(if any_backend {
            Generated::backend(data)
        } else {
            Generated::mock(data)
        })
    }

    /// Generate one calendar window of days within a month.
    #[instrument(skip_all, fields(start_day = start_day, end_day = end_day))]
    pub async fn generate_week(
        &self,
        capability: &BackendCapability,
        month_anchor: NaiveDate,
        start_day: u32,
        end_day: u32,
        settings: &FrequencySettings,
    ) -> CalliopeResult<Generated<Vec<CalendarPost>>> {
        if start_day == 0 || start_day > end_day {
            return Err(ValidationError::new("invalid day window").into());
        }
        self.calendar_window(
            capability,
            TaskKind::WeeklyCalendar,
            month_anchor,
            start_day,
            end_day,
            settings,
            None,
        )
        .await
    }

    /// Shared window generation. The task kind distinguishes the composed
    /// monthly path from a standalone week so routing can treat them
    /// differently.
    async fn calendar_window(
        &self,
        capability: &BackendCapability,
        task: TaskKind,
        month_anchor: NaiveDate,
        start_day: u32,
        end_day: u32,
        settings: &FrequencySettings,
        style: Option<&LearnedCharacteristics>,
    ) -> CalliopeResult<Generated<Vec<CalendarPost>>> {
        let request = prompt::week_calendar(month_anchor, start_day, end_day, settings, style)?;
        if let Some(raw) = self.attempt(capability, task, &request).await {
            match extract_typed::<Vec<CalendarPost>>(&raw, Shape::Array) {
                Ok(rows) => {
                    let rows = normalize_window(rows, month_anchor, start_day, end_day);
                    if !rows.is_empty() {
                        return Ok(Generated::backend(rows));
                    }
                    warn!(start_day, end_day, "backend window had no usable rows");
                }
                Err(error) => {
                    warn!(start_day, end_day, %error, "calendar window extraction failed");
                }
            }
        }
        Ok(Generated::mock(mock_week_calendar(
            month_anchor,
            start_day,
            end_day,
            settings,
        )))
    }

    /// Regenerate a single calendar row.
    ///
    /// The slot fields (date, weekday, time, platform) are pinned to the
    /// input row regardless of what the backend returns.
    #[instrument(skip_all, fields(date = %post.date, platform = %post.platform))]
    pub async fn regenerate_row(
        &self,
        capability: &BackendCapability,
        post: &CalendarPost,
        custom_instruction: Option<&str>,
    ) -> CalliopeResult<Generated<CalendarPost>> {
        let request = prompt::row_regeneration(post, custom_instruction)?;
        if let Some(raw) = self
            .attempt(capability, TaskKind::RowRegeneration, &request)
            .await
        {
            match extract_typed::<CalendarPost>(&raw, Shape::Object) {
                Ok(mut row) => {
                    row.date = post.date;
                    row.day_of_week = post.day_of_week.clone();
                    row.time = post.time.clone();
                    row.platform = post.platform;
                    return Ok(Generated::backend(row));
                }
                Err(error) => warn!(%error, "row regeneration extraction failed"),
            }
        }
        Ok(Generated::mock(mock_row(post, custom_instruction)))
    }

    /// Generate posts for each condition, in input order.
    ///
    /// Conditions are processed sequentially and fall back independently: a
    /// failed condition yields its mock batch without affecting the others.
    #[instrument(skip_all, fields(platform = %platform, conditions = conditions.len()))]
    pub async fn generate_posts(
        &self,
        capability: &BackendCapability,
        platform: Platform,
        conditions: &[PostCondition],
        count_per_condition: usize,
        style: Option<&LearnedCharacteristics>,
    ) -> CalliopeResult<Vec<(String, Generated<Vec<GeneratedPost>>)>> {
        if conditions.is_empty() {
            return Err(ValidationError::new("at least one condition is required").into());
        }
        if count_per_condition == 0 {
            return Err(ValidationError::new("count per condition must be at least 1").into());
        }

        let mut results = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let batch = self
                .posts_for(capability, platform, condition, count_per_condition, style)
                .await?;
            results.push((condition.category.clone(), batch));
        }
        Ok(results)
    }

    async fn posts_for(
        &self,
        capability: &BackendCapability,
        platform: Platform,
        condition: &PostCondition,
        count: usize,
        style: Option<&LearnedCharacteristics>,
    ) -> CalliopeResult<Generated<Vec<GeneratedPost>>> {
        let request = prompt::posts(platform, condition, count, style)?;
        if let Some(raw) = self.attempt(capability, TaskKind::BulkPosts, &request).await {
            match extract_typed::<Vec<WirePost>>(&raw, Shape::Array) {
                Ok(wire) if !wire.is_empty() => {
                    let posts = wire
                        .into_iter()
                        .take(count)
                        .map(|post| {
                            GeneratedPost::truncated(
                                post.content,
                                post.hashtags,
                                condition.category.clone(),
                                platform,
                            )
                        })
                        .collect();
                    return Ok(Generated::backend(posts));
                }
                Ok(_) => warn!(category = %condition.category, "backend returned no posts"),
                Err(error) => {
                    warn!(category = %condition.category, %error, "post extraction failed");
                }
            }
        }
        Ok(Generated::mock(mock_posts(condition, count, platform)))
    }

    /// Analyze writing samples into style characteristics.
    ///
    /// The learned record is persisted per style kind, best-effort.
    #[instrument(skip_all, fields(kind = %kind, samples = samples.len()))]
    pub async fn analyze_style(
        &self,
        capability: &BackendCapability,
        kind: StyleKind,
        samples: &[String],
    ) -> CalliopeResult<Generated<LearnedCharacteristics>> {
        if samples.iter().all(|sample| sample.trim().is_empty()) {
            return Err(ValidationError::new("at least one non-empty sample is required").into());
        }

        let request = prompt::style_analysis(samples)?;
        let generated = match self
            .attempt(capability, TaskKind::StyleAnalysis, &request)
            .await
        {
            Some(raw) => match extract_typed::<LearnedCharacteristics>(&raw, Shape::Object) {
                Ok(characteristics) => Generated::backend(characteristics),
                Err(error) => {
                    warn!(%error, "style analysis extraction failed");
                    Generated::mock(mock_style_characteristics())
                }
            },
            None => Generated::mock(mock_style_characteristics()),
        };

        let record = StyleLearningData {
            kind,
            samples: samples.to_vec(),
            learned_characteristics: generated.value.clone(),
            updated_at: Utc::now(),
        };
        self.persist("style_learning", &kind.to_string(), &record)
            .await;

        Ok(generated)
    }

    /// Generate a persona description. Free text, no extraction.
    #[instrument(skip_all)]
    pub async fn generate_persona(
        &self,
        capability: &BackendCapability,
        attributes: &PersonaAttributes,
    ) -> CalliopeResult<Generated<String>> {
        let request = prompt::persona(attributes)?;
        if let Some(raw) = self
            .attempt(capability, TaskKind::PersonaDescription, &request)
            .await
        {
            let text = raw.trim();
            if !text.is_empty() {
                return Ok(Generated::backend(text.to_string()));
            }
            warn!("backend returned an empty persona");
        }
        Ok(Generated::mock(mock_persona(attributes)))
    }

    /// Generate a month of NOTE article ideas.
    ///
    /// Backend ideas get fresh ids and a pending status; the result is
    /// persisted per month, best-effort.
    #[instrument(skip_all, fields(month = %month_anchor))]
    pub async fn generate_note_ideas(
        &self,
        capability: &BackendCapability,
        month_anchor: NaiveDate,
        settings: &FrequencySettings,
    ) -> CalliopeResult<Generated<NoteIdeasData>> {
        let request = prompt::note_ideas(month_anchor, settings)?;
        let month = format!("{:04}-{:02}", month_anchor.year(), month_anchor.month());

        let ideas = match self.attempt(capability, TaskKind::NoteIdeas, &request).await {
            Some(raw) => match extract_typed::<Vec<NoteIdea>>(&raw, Shape::Array) {
                Ok(mut ideas) if !ideas.is_empty() => {
                    for idea in &mut ideas {
                        idea.id = new_post_id();
                        idea.status = IdeaStatus::Pending;
                    }
                    Generated::backend(ideas)
                }
                Ok(_) => {
                    warn!("backend returned no note ideas");
                    Generated::mock(mock_note_ideas(month_anchor, settings))
                }
                Err(error) => {
                    warn!(%error, "note idea extraction failed");
                    Generated::mock(mock_note_ideas(month_anchor, settings))
                }
            },
            None => Generated::mock(mock_note_ideas(month_anchor, settings)),
        };

        let data = ideas.map(|ideas| NoteIdeasData {
            month: month.clone(),
            ideas,
        });
        self.persist("note_ideas", &month, &data.value).await;
        Ok(data)
    }

    /// Draft a NOTE article from a title idea, a content idea, or both.
    #[instrument(skip_all, fields(kind = %kind))]
    pub async fn generate_article(
        &self,
        capability: &BackendCapability,
        kind: NoteKind,
        title_idea: &str,
        content_idea: &str,
        style_guide: Option<&str>,
    ) -> CalliopeResult<Generated<String>> {
        if title_idea.trim().is_empty() && content_idea.trim().is_empty() {
            return Err(ValidationError::new("a title idea or a content idea is required").into());
        }

        let request = prompt::article(kind, title_idea, content_idea, style_guide)?;
        if let Some(raw) = self
            .attempt(capability, TaskKind::ArticleDraft, &request)
            .await
        {
            let text = raw.trim();
            if !text.is_empty() {
                return Ok(Generated::backend(text.to_string()));
            }
            warn!("backend returned an empty article");
        }
        Ok(Generated::mock(mock_article(kind, title_idea, content_idea)))
    }

    /// Revise an existing article following an instruction.
    #[instrument(skip_all)]
    pub async fn brush_up_article(
        &self,
        capability: &BackendCapability,
        article: &str,
        instruction: &str,
    ) -> CalliopeResult<Generated<String>> {
        if article.trim().is_empty() || instruction.trim().is_empty() {
            return Err(
                ValidationError::new("both the article and the instruction are required").into(),
            );
        }

        let request = prompt::brush_up(article, instruction)?;
        if let Some(raw) = self
            .attempt(capability, TaskKind::ArticleRevision, &request)
            .await
        {
            let text = raw.trim();
            if !text.is_empty() {
                return Ok(Generated::backend(text.to_string()));
            }
            warn!("backend returned an empty revision");
        }
        Ok(Generated::mock(mock_brush_up(article, instruction)))
    }

    /// One style-guide chat turn.
    ///
    /// The reply is scanned for a guide-update block. There is no mock
    /// fallback here: with no usable backend the outcome is a fixed
    /// informational message and an unchanged guide.
    #[instrument(skip_all, fields(kind = %kind, history = history.len()))]
    pub async fn style_chat(
        &self,
        capability: &BackendCapability,
        kind: GuideKind,
        guide_text: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> CalliopeResult<ChatOutcome> {
        if message.trim().is_empty() {
            return Err(ValidationError::new("a chat message is required").into());
        }

        let request = prompt::style_chat(kind, guide_text, message, history)?;
        match self
            .attempt(capability, TaskKind::StyleGuideChat, &request)
            .await
        {
            Some(raw) => Ok(split_guide_update(&raw)),
            None => Ok(ChatOutcome::reply_only(OFFLINE_CHAT_MESSAGE)),
        }
    }
}

/// Discard backend calendar rows outside the requested window and recompute
/// weekday labels, which backends are not trusted for.
fn normalize_window(
    rows: Vec<CalendarPost>,
    month_anchor: NaiveDate,
    start_day: u32,
    end_day: u32,
) -> Vec<CalendarPost> {
    let mut rows: Vec<CalendarPost> = rows
        .into_iter()
        .filter(|row| {
            row.date.year() == month_anchor.year()
                && row.date.month() == month_anchor.month()
                && (start_day..=end_day).contains(&row.date.day())
        })
        .map(|mut row| {
            row.day_of_week = day_of_week_short(row.date).to_string();
            row
        })
        .collect();
    rows.sort_by_key(|row| row.date);
    rows
}
