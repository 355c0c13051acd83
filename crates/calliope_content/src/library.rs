//! Typed persistence over a document store.
//!
//! [`ContentLibrary`] gives each stored entity a stable collection and key
//! scheme: calendars per month, a saved-posts box per platform, learned
//! style data per style kind, guide documents per guide kind, and NOTE idea
//! sheets per month.

use calliope_core::{
    CalendarData, GeneratedPost, GuideKind, IdeaStatus, NoteIdea, NoteIdeasData, Platform,
    SavedPost, StyleKind, StyleLearningData,
};
use calliope_error::{CalliopeResult, JsonError};
use calliope_interface::DocumentStore;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const CALENDARS: &str = "calendars";
const SAVED_POSTS: &str = "saved_posts";
const STYLE_LEARNING: &str = "style_learning";
const STYLE_GUIDES: &str = "style_guides";
const NOTE_IDEAS: &str = "note_ideas";

/// Typed content persistence.
#[derive(Clone)]
pub struct ContentLibrary {
    store: Arc<dyn DocumentStore>,
}

impl ContentLibrary {
    /// Wrap a document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn save_typed<T: Serialize>(
        &self,
        collection: &str,
        key: &str,
        value: &T,
    ) -> CalliopeResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| JsonError::new(format!("Failed to serialize {collection}/{key}: {e}")))?;
        self.store.save(collection, key, &value).await
    }

    async fn load_typed<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> CalliopeResult<Option<T>> {
        match self.store.load(collection, key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| {
                    JsonError::new(format!("Failed to decode {collection}/{key}: {e}")).into()
                }),
            None => Ok(None),
        }
    }

    /// Persist a monthly calendar under its id.
    pub async fn save_calendar(&self, calendar: &CalendarData) -> CalliopeResult<()> {
        self.save_typed(CALENDARS, &calendar.calendar_id, calendar)
            .await
    }

    /// Load the calendar for the month containing `start`.
    pub async fn load_calendar(&self, start: NaiveDate) -> CalliopeResult<Option<CalendarData>> {
        self.load_typed(CALENDARS, &CalendarData::id_for(start))
            .await
    }

    fn saved_posts_key(platform: Platform) -> String {
        format!("{platform}_saved")
    }

    /// Saved posts for a platform, newest first.
    pub async fn saved_posts(&self, platform: Platform) -> CalliopeResult<Vec<SavedPost>> {
        Ok(self
            .load_typed(SAVED_POSTS, &Self::saved_posts_key(platform))
            .await?
            .unwrap_or_default())
    }

    /// Add a post to the platform's saved box.
    ///
    /// Saving an already saved id is a no-op that returns the existing
    /// entry. New entries go to the front, newest first.
    pub async fn save_post(
        &self,
        platform: Platform,
        post: GeneratedPost,
    ) -> CalliopeResult<SavedPost> {
        let mut saved = self.saved_posts(platform).await?;
        if let Some(existing) = saved.iter().find(|s| s.post.id() == post.id()) {
            return Ok(existing.clone());
        }

        let entry = SavedPost::now(post);
        saved.insert(0, entry.clone());
        self.save_typed(SAVED_POSTS, &Self::saved_posts_key(platform), &saved)
            .await?;
        Ok(entry)
    }

    /// Remove a saved post by id. `false` when the id was not in the box.
    pub async fn delete_saved_post(&self, platform: Platform, id: &str) -> CalliopeResult<bool> {
        let mut saved = self.saved_posts(platform).await?;
        let before = saved.len();
        saved.retain(|s| s.post.id().as_str() != id);
        if saved.len() == before {
            return Ok(false);
        }
        self.save_typed(SAVED_POSTS, &Self::saved_posts_key(platform), &saved)
            .await?;
        Ok(true)
    }

    /// Persist learned style data under its kind.
    pub async fn save_style_learning(&self, data: &StyleLearningData) -> CalliopeResult<()> {
        self.save_typed(STYLE_LEARNING, &data.kind.to_string(), data)
            .await
    }

    /// Load learned style data for a kind.
    pub async fn load_style_learning(
        &self,
        kind: StyleKind,
    ) -> CalliopeResult<Option<StyleLearningData>> {
        self.load_typed(STYLE_LEARNING, &kind.to_string()).await
    }

    /// Persist a style-guide document.
    pub async fn save_guide(&self, kind: GuideKind, content: &str) -> CalliopeResult<()> {
        self.save_typed(STYLE_GUIDES, &kind.to_string(), &content)
            .await
    }

    /// Load a style-guide document.
    pub async fn load_guide(&self, kind: GuideKind) -> CalliopeResult<Option<String>> {
        self.load_typed(STYLE_GUIDES, &kind.to_string()).await
    }

    /// Persist a month's NOTE idea sheet.
    pub async fn save_note_ideas(&self, data: &NoteIdeasData) -> CalliopeResult<()> {
        self.save_typed(NOTE_IDEAS, &data.month, data).await
    }

    /// Load a month's NOTE idea sheet.
    pub async fn load_note_ideas(&self, month: &str) -> CalliopeResult<Option<NoteIdeasData>> {
        self.load_typed(NOTE_IDEAS, month).await
    }

    /// Replace one idea in a month's sheet, matched by id.
    pub async fn update_note_idea(&self, month: &str, idea: NoteIdea) -> CalliopeResult<bool> {
        self.modify_note_ideas(month, |ideas| {
            match ideas.iter_mut().find(|i| i.id == idea.id) {
                Some(slot) => {
                    *slot = idea;
                    true
                }
                None => false,
            }
        })
        .await
    }

    /// Mark one idea approved. `false` when the id is unknown.
    pub async fn approve_note_idea(&self, month: &str, id: &str) -> CalliopeResult<bool> {
        self.modify_note_ideas(month, |ideas| {
            match ideas.iter_mut().find(|i| i.id == id) {
                Some(idea) => {
                    idea.status = IdeaStatus::Approved;
                    true
                }
                None => false,
            }
        })
        .await
    }

    /// Delete one idea from a month's sheet. `false` when the id is unknown.
    pub async fn delete_note_idea(&self, month: &str, id: &str) -> CalliopeResult<bool> {
        self.modify_note_ideas(month, |ideas| {
            let before = ideas.len();
            ideas.retain(|i| i.id != id);
            ideas.len() != before
        })
        .await
    }

    async fn modify_note_ideas(
        &self,
        month: &str,
        apply: impl FnOnce(&mut Vec<NoteIdea>) -> bool,
    ) -> CalliopeResult<bool> {
        let Some(mut data) = self.load_note_ideas(month).await? else {
            return Ok(false);
        };
        if !apply(&mut data.ideas) {
            return Ok(false);
        }
        self.save_note_ideas(&data).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calliope_core::NoteKind;
    use calliope_storage::MemoryStore;

    fn library() -> ContentLibrary {
        ContentLibrary::new(Arc::new(MemoryStore::new()))
    }

    fn post(content: &str) -> GeneratedPost {
        GeneratedPost::new(content.to_string(), vec![], "HSP共感".to_string())
    }

    #[tokio::test]
    async fn saved_posts_are_newest_first_and_deduplicated() {
        let library = library();
        let first = post("最初の投稿");
        let second = post("次の投稿");

        library.save_post(Platform::X, first.clone()).await.unwrap();
        library
            .save_post(Platform::X, second.clone())
            .await
            .unwrap();

        let saved = library.saved_posts(Platform::X).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].post.id(), second.id());

        // Saving the same id again changes nothing.
        library
            .save_post(Platform::X, second.clone())
            .await
            .unwrap();
        assert_eq!(library.saved_posts(Platform::X).await.unwrap().len(), 2);

        assert!(
            library
                .delete_saved_post(Platform::X, first.id())
                .await
                .unwrap()
        );
        assert!(!library.delete_saved_post(Platform::X, "missing").await.unwrap());
    }

    #[tokio::test]
    async fn saved_boxes_are_per_platform() {
        let library = library();
        library.save_post(Platform::X, post("X向け")).await.unwrap();
        assert!(library.saved_posts(Platform::Threads).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn note_idea_lifecycle() {
        let library = library();
        let ideas = crate::mock_note_ideas(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            &calliope_core::FrequencySettings::default(),
        );
        let id = ideas[0].id.clone();
        let data = NoteIdeasData {
            month: "2025-03".to_string(),
            ideas,
        };
        library.save_note_ideas(&data).await.unwrap();

        assert!(library.approve_note_idea("2025-03", &id).await.unwrap());
        let reloaded = library.load_note_ideas("2025-03").await.unwrap().unwrap();
        assert_eq!(
            reloaded.ideas.iter().find(|i| i.id == id).unwrap().status,
            IdeaStatus::Approved
        );

        let mut replacement = reloaded.ideas[0].clone();
        replacement.title = "改題しました".to_string();
        replacement.kind = NoteKind::FreeNoAffiliate;
        assert!(
            library
                .update_note_idea("2025-03", replacement)
                .await
                .unwrap()
        );

        assert!(library.delete_note_idea("2025-03", &id).await.unwrap());
        assert!(!library.delete_note_idea("2025-03", &id).await.unwrap());
        assert!(!library.approve_note_idea("2024-12", &id).await.unwrap());
    }

    #[tokio::test]
    async fn guides_round_trip() {
        let library = library();
        assert_eq!(library.load_guide(GuideKind::X).await.unwrap(), None);
        library
            .save_guide(GuideKind::X, "# X投稿ガイド")
            .await
            .unwrap();
        assert_eq!(
            library.load_guide(GuideKind::X).await.unwrap().as_deref(),
            Some("# X投稿ガイド")
        );
    }
}
