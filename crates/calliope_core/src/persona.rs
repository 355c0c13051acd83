//! Target-reader persona types.

use serde::{Deserialize, Serialize};

/// Attributes describing the target reader, all optional free text.
///
/// Missing attributes are filled with sensible defaults by the generators,
/// never treated as errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonaAttributes {
    /// Age range (e.g. "20代後半")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    /// Gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Occupation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Interests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    /// Challenges and worries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    /// Goals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
}
