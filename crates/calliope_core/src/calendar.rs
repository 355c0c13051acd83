//! Posting calendar types.

use crate::{FrequencySettings, Platform};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One planned post in a content calendar.
///
/// The `category` is an open enumeration: the product ships a default pool
/// but operators add their own, so it stays a plain string.
///
/// # Examples
///
/// ```
/// use calliope_core::{CalendarPost, Platform};
/// use chrono::NaiveDate;
///
/// let post = CalendarPost {
///     date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     day_of_week: "土".to_string(),
///     time: Some("07:30".to_string()),
///     platform: Platform::X,
///     category: "HSP共感".to_string(),
///     title_idea: "朝の過ごし方".to_string(),
///     purpose: "共感形成".to_string(),
///     hashtags: vec!["#HSP".to_string()],
/// };
/// assert_eq!(post.platform, Platform::X);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarPost {
    /// Calendar date of the post
    pub date: NaiveDate,
    /// Localized short weekday name ("月", "火", ...)
    pub day_of_week: String,
    /// Posting time as "HH:MM"; absent for platforms without time slots
    #[serde(default)]
    pub time: Option<String>,
    /// Target platform
    pub platform: Platform,
    /// Content category (open enumeration)
    pub category: String,
    /// Idea for the post title or body
    pub title_idea: String,
    /// Editorial purpose of the post
    pub purpose: String,
    /// Suggested hashtags; may be empty
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// A full generated calendar with its generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarData {
    /// Stable identifier, `calendar_{YYYY-MM}`
    pub calendar_id: String,
    /// First day covered
    pub start_date: NaiveDate,
    /// Last day covered
    pub end_date: NaiveDate,
    /// Frequency settings the calendar was generated from
    pub frequency_settings: FrequencySettings,
    /// Planned posts in date order
    pub posts: Vec<CalendarPost>,
}

impl CalendarData {
    /// Identifier for the calendar covering the month of `start`.
    pub fn id_for(start: NaiveDate) -> String {
        format!("calendar_{}", start.format("%Y-%m"))
    }
}
