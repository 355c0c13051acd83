//! Writing-style learning types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The six sample-learning style types, one per content channel.
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
pub enum StyleKind {
    /// Free NOTE articles without affiliate links
    #[display("note_free")]
    NoteFree,
    /// Free NOTE articles with affiliate links
    #[display("note_affiliate")]
    NoteAffiliate,
    /// Membership-only NOTE articles
    #[display("note_membership")]
    NoteMembership,
    /// Paid NOTE articles
    #[display("note_paid")]
    NotePaid,
    /// X posts
    #[display("x_style")]
    XStyle,
    /// Threads posts
    #[display("threads_style")]
    ThreadsStyle,
}

/// Style-guide documents, one per platform.
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
pub enum GuideKind {
    /// X posting guide
    #[display("x")]
    X,
    /// Threads posting guide
    #[display("threads")]
    Threads,
    /// NOTE article guide
    #[display("note")]
    Note,
}

impl GuideKind {
    /// Human-readable label for the guide.
    pub fn label(&self) -> &'static str {
        match self {
            GuideKind::X => "X投稿",
            GuideKind::Threads => "Threads投稿",
            GuideKind::Note => "NOTE記事",
        }
    }
}

/// Characteristics learned from writing samples.
///
/// Every field defaults to empty so a partially filled analysis from a
/// backend never breaks a consumer. The structural fields are produced only
/// for long-form styles and stay empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LearnedCharacteristics {
    /// Overall tone description
    #[serde(default)]
    pub tone: String,
    /// Common sentence endings
    #[serde(default)]
    pub sentence_endings: Vec<String>,
    /// Emoji usage description
    #[serde(default)]
    pub emoji_usage: String,
    /// Paragraph style description
    #[serde(default)]
    pub paragraph_style: String,
    /// Frequently used keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// How articles open
    #[serde(default)]
    pub intro_patterns: Vec<String>,
    /// Typical body structure
    #[serde(default)]
    pub body_structure: String,
    /// Heading style description
    #[serde(default)]
    pub heading_style: String,
    /// Transition phrases between sections
    #[serde(default)]
    pub transition_phrases: Vec<String>,
    /// How articles close
    #[serde(default)]
    pub closing_patterns: Vec<String>,
}

/// Stored style-learning state for one style type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleLearningData {
    /// Which style this data belongs to
    #[serde(rename = "type")]
    pub kind: StyleKind,
    /// The writing samples provided by the operator
    pub samples: Vec<String>,
    /// Characteristics learned from the samples
    pub learned_characteristics: LearnedCharacteristics,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristics_tolerate_missing_fields() {
        let json = r#"{"tone": "共感的", "keywords": ["HSP"]}"#;
        let parsed: LearnedCharacteristics = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tone, "共感的");
        assert!(parsed.sentence_endings.is_empty());
        assert!(parsed.closing_patterns.is_empty());
    }

    #[test]
    fn style_kind_wire_names() {
        let json = serde_json::to_string(&StyleKind::NoteAffiliate).unwrap();
        assert_eq!(json, "\"note_affiliate\"");
    }
}
