//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles are shared between the style-chat surface and the backend wire
/// clients.
///
/// # Examples
///
/// ```
/// use calliope_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
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
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages are from the human
    User,
    /// Assistant messages are from the model
    Assistant,
}

/// One message in a style-chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: String,
    /// Who sent the message
    pub role: Role,
    /// Message body
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh id and the current timestamp.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: crate::new_post_id(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
