//! Publishing platform enumeration.

use serde::{Deserialize, Serialize};

/// A publishing destination for generated content.
///
/// # Examples
///
/// ```
/// use calliope_core::Platform;
///
/// assert_eq!(Platform::X.character_limit(), 140);
/// assert_eq!(format!("{}", Platform::Note), "NOTE");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Platform {
    /// Short-form posts on X (Twitter).
    #[display("X")]
    X,
    /// Long-form posts on Threads.
    #[display("Threads")]
    Threads,
    /// Long-form NOTE articles. Articles carry no per-post time slot.
    #[display("NOTE")]
    #[serde(rename = "NOTE")]
    Note,
}

impl Platform {
    /// Maximum character count for a single post on this platform.
    ///
    /// NOTE articles are limited per article kind instead; see
    /// [`crate::article_character_limit`]. The value returned here is the
    /// free-article ceiling.
    pub fn character_limit(&self) -> usize {
        match self {
            Platform::X => 140,
            Platform::Threads => 500,
            Platform::Note => 2000,
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Platform::X),
            "Threads" | "threads" => Ok(Platform::Threads),
            "NOTE" | "note" => Ok(Platform::Note),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}
