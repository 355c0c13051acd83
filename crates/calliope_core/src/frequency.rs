//! Posting frequency settings.

use serde::{Deserialize, Serialize};

/// How often content is published, per platform.
///
/// Zero values are valid everywhere: a zero-frequency slot simply produces
/// no posts, never an error.
///
/// # Examples
///
/// ```
/// use calliope_core::FrequencySettings;
///
/// let settings = FrequencySettings::default();
/// assert_eq!(settings.x_per_day, 3);
/// assert_eq!(settings.threads_per_day, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySettings {
    /// X posts per day
    pub x_per_day: u32,
    /// Threads posts per day
    pub threads_per_day: u32,
    /// Free NOTE articles without affiliate links, per month
    pub note_free_no_affiliate_per_month: u32,
    /// Free NOTE articles with affiliate links, per month
    pub note_free_with_affiliate_per_month: u32,
    /// Membership-only NOTE articles per month
    pub note_membership_per_month: u32,
    /// Paid NOTE articles per month
    pub note_paid_per_month: u32,
}

impl Default for FrequencySettings {
    fn default() -> Self {
        Self {
            x_per_day: 3,
            threads_per_day: 1,
            note_free_no_affiliate_per_month: 4,
            note_free_with_affiliate_per_month: 2,
            note_membership_per_month: 3,
            note_paid_per_month: 1,
        }
    }
}
