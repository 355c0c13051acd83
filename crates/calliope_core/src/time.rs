//! Date helpers and small text utilities.

use calliope_error::{CalliopeResult, ValidationError};
use chrono::{Datelike, NaiveDate, Weekday};

/// Japanese short weekday name for a date.
///
/// # Examples
///
/// ```
/// use calliope_core::day_of_week_short;
/// use chrono::NaiveDate;
///
/// // 2025-03-01 is a Saturday.
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert_eq!(day_of_week_short(date), "土");
/// ```
pub fn day_of_week_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "日",
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    end_of_month(date).day()
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // The first of a month always exists; pred of it is the last of ours.
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Parse a `YYYY-MM` month designator into the first day of that month.
///
/// # Errors
///
/// Returns a validation error when the string is not a valid `YYYY-MM`.
///
/// # Examples
///
/// ```
/// use calliope_core::parse_month;
///
/// let start = parse_month("2025-03").unwrap();
/// assert_eq!(start.to_string(), "2025-03-01");
/// assert!(parse_month("2025-13").is_err());
/// ```
pub fn parse_month(month: &str) -> CalliopeResult<NaiveDate> {
    let mut parts = month.splitn(2, '-');
    let year = parts
        .next()
        .and_then(|y| y.parse::<i32>().ok())
        .ok_or_else(|| ValidationError::new(format!("Invalid month designator: {}", month)))?;
    let month_num = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .ok_or_else(|| ValidationError::new(format!("Invalid month designator: {}", month)))?;
    NaiveDate::from_ymd_opt(year, month_num, 1)
        .ok_or_else(|| ValidationError::new(format!("Invalid month designator: {}", month)).into())
}

/// Generate a fresh unique identifier for a generated entity.
pub fn new_post_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Truncate `text` to at most `max_chars` Unicode scalar values, replacing the
/// tail with `...` when truncation occurs.
///
/// Counts characters, not bytes, so platform limits hold for Japanese text.
///
/// # Examples
///
/// ```
/// use calliope_core::truncate_chars;
///
/// assert_eq!(truncate_chars("hello", 10), "hello");
/// let cut = truncate_chars(&"あ".repeat(160), 140);
/// assert_eq!(cut.chars().count(), 140);
/// assert!(cut.ends_with("..."));
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    const SUFFIX: &str = "...";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(SUFFIX.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        let march = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(days_in_month(march), 31);
        let feb = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(days_in_month(feb), 29);
        let dec = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(end_of_month(dec).to_string(), "2025-12-31");
    }

    #[test]
    fn truncation_is_char_exact() {
        let text = "a".repeat(160);
        let cut = truncate_chars(&text, 140);
        assert_eq!(cut.chars().count(), 140);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_chars("short", 140), "short");
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert!(parse_month("2025-00").is_err());
        assert!(parse_month("not-a-month").is_err());
        assert!(parse_month("2025").is_err());
    }
}
