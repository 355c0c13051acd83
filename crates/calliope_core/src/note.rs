//! NOTE article planning types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// NOTE article monetization kind.
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
pub enum NoteKind {
    /// Free article without affiliate links
    #[display("free_no_affiliate")]
    FreeNoAffiliate,
    /// Free article with affiliate links
    #[display("free_with_affiliate")]
    FreeWithAffiliate,
    /// Membership-only article
    #[display("membership")]
    Membership,
    /// Paid article
    #[display("paid")]
    Paid,
}

impl NoteKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            NoteKind::FreeNoAffiliate => "無料記事（アフィなし）",
            NoteKind::FreeWithAffiliate => "無料記事（アフィあり）",
            NoteKind::Membership => "メンバーシップ記事",
            NoteKind::Paid => "有料記事",
        }
    }
}

/// Review status of an article idea.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Awaiting operator review
    #[display("pending")]
    Pending,
    /// Approved for writing
    #[display("approved")]
    Approved,
}

/// Affiliate product attached to an article idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateInfo {
    /// Product category (e.g. ITスクール)
    pub category: String,
    /// Product name
    pub name: String,
    /// Product URL, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Selling point, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
}

/// One planned NOTE article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteIdea {
    /// Unique identifier
    pub id: String,
    /// Planned publication date
    pub publish_date: NaiveDate,
    /// Article kind
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// Working title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Review status
    pub status: IdeaStatus,
    /// Affiliate product, for affiliate articles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_info: Option<AffiliateInfo>,
}

/// A month's worth of article ideas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteIdeasData {
    /// Month designator, `YYYY-MM`
    pub month: String,
    /// Planned ideas
    pub ideas: Vec<NoteIdea>,
}
