//! Generated post types.

use crate::{Platform, new_post_id, truncate_chars};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generation conditions for one category of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCondition {
    /// Content category
    pub category: String,
    /// What the posts should communicate
    pub content_idea: String,
    /// Editorial purpose
    pub purpose: String,
    /// Space-separated hashtags, free text
    pub hashtags: String,
}

impl PostCondition {
    /// Hashtags split into individual non-empty tokens.
    pub fn hashtag_list(&self) -> Vec<String> {
        self.hashtags
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// A single generated social post.
///
/// `character_count` is a derived field: it always equals
/// `content.chars().count()` and cannot be set independently. Construct
/// through [`GeneratedPost::new`] or [`GeneratedPost::truncated`] so the
/// invariant holds even for content returned by a backend.
///
/// # Examples
///
/// ```
/// use calliope_core::GeneratedPost;
///
/// let post = GeneratedPost::new(
///     "今日もおつかれさま".to_string(),
///     vec!["#HSP".to_string()],
///     "HSP共感".to_string(),
/// );
/// assert_eq!(*post.character_count(), post.content().chars().count());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeneratedPost {
    /// Unique identifier
    id: String,
    /// Post body, hashtags included
    content: String,
    /// Unicode scalar count of `content`; derived, never trusted from input
    character_count: usize,
    /// Hashtags used in the post
    hashtags: Vec<String>,
    /// Content category
    category: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl GeneratedPost {
    /// Create a post with a fresh id and a recomputed character count.
    pub fn new(content: String, hashtags: Vec<String>, category: String) -> Self {
        let character_count = content.chars().count();
        Self {
            id: new_post_id(),
            content,
            character_count,
            hashtags,
            category,
            created_at: Utc::now(),
        }
    }

    /// Create a post truncated to the platform's character limit.
    ///
    /// Content exceeding the limit is cut to `limit - 3` characters with a
    /// `...` suffix; it never silently exceeds the limit.
    pub fn truncated(
        content: String,
        hashtags: Vec<String>,
        category: String,
        platform: Platform,
    ) -> Self {
        let content = truncate_chars(&content, platform.character_limit());
        Self::new(content, hashtags, category)
    }
}

/// A post kept in the saved-posts box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    /// The saved post
    #[serde(flatten)]
    pub post: GeneratedPost,
    /// When it was saved
    pub saved_at: DateTime<Utc>,
}

impl SavedPost {
    /// Wrap a generated post with the current save timestamp.
    pub fn now(post: GeneratedPost) -> Self {
        Self {
            post,
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_count_is_derived() {
        let post = GeneratedPost::new(
            "短い投稿です".to_string(),
            vec![],
            "マインド".to_string(),
        );
        assert_eq!(*post.character_count(), 6);
    }

    #[test]
    fn truncation_respects_platform_limit() {
        let long = "あ".repeat(160);
        let post = GeneratedPost::truncated(long, vec![], "HSP共感".to_string(), Platform::X);
        assert_eq!(*post.character_count(), 140);
        assert!(post.content().ends_with("..."));
    }

    #[test]
    fn hashtag_list_splits_whitespace() {
        let condition = PostCondition {
            category: "HSP共感".to_string(),
            content_idea: "朝の習慣".to_string(),
            purpose: "共感形成".to_string(),
            hashtags: "#HSP  #繊細さん".to_string(),
        };
        assert_eq!(condition.hashtag_list(), vec!["#HSP", "#繊細さん"]);
    }
}
