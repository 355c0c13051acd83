//! Style-guide chat reply handling.

use crate::prompt::{GUIDE_UPDATE_CLOSE, GUIDE_UPDATE_OPEN};

/// Fixed assistant reply used when no chat backend is available.
///
/// The style chat has no mock fallback; an unavailable or failing backend
/// produces this single informational message and leaves the guide as is.
pub const OFFLINE_CHAT_MESSAGE: &str = "現在、AIバックエンドに接続できないため、ガイドの相談を続けられません。\
APIキーの設定をご確認のうえ、もう一度お試しください。現在のガイドはそのまま保存されています。";

/// The result of one style-chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    /// Assistant reply to show in the conversation
    pub reply: String,
    /// Whether the reply carried a guide revision
    pub guide_updated: bool,
    /// The revised guide text, when one was carried
    pub updated_guide: Option<String>,
}

impl ChatOutcome {
    /// An outcome that leaves the guide untouched.
    pub fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            guide_updated: false,
            updated_guide: None,
        }
    }
}

/// Split a raw chat reply into the conversational part and an optional
/// guide revision.
///
/// A revision is delimited by `<<<GUIDE_UPDATE>>>` and
/// `<<<END_GUIDE_UPDATE>>>`. The block is removed from the reply shown to
/// the user. An opening marker without a closing one is treated as no
/// update; the raw reply passes through unchanged.
pub fn split_guide_update(raw: &str) -> ChatOutcome {
    let Some(open) = raw.find(GUIDE_UPDATE_OPEN) else {
        return ChatOutcome::reply_only(raw.trim());
    };
    let after_open = open + GUIDE_UPDATE_OPEN.len();
    let Some(close_offset) = raw[after_open..].find(GUIDE_UPDATE_CLOSE) else {
        return ChatOutcome::reply_only(raw.trim());
    };
    let close = after_open + close_offset;

    let guide = raw[after_open..close].trim().to_string();
    let mut reply = raw[..open].trim_end().to_string();
    let tail = raw[close + GUIDE_UPDATE_CLOSE.len()..].trim();
    if !tail.is_empty() {
        if !reply.is_empty() {
            reply.push_str("\n\n");
        }
        reply.push_str(tail);
    }

    ChatOutcome {
        reply: reply.trim().to_string(),
        guide_updated: true,
        updated_guide: Some(guide),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_without_block_passes_through() {
        let outcome = split_guide_update("語尾はそのままで良いと思います。");
        assert!(!outcome.guide_updated);
        assert_eq!(outcome.updated_guide, None);
        assert_eq!(outcome.reply, "語尾はそのままで良いと思います。");
    }

    #[test]
    fn block_is_extracted_and_removed() {
        let raw = "ガイドを更新しました。\n\n<<<GUIDE_UPDATE>>>\n# X投稿ガイド\n- 語尾は「です・ます」\n<<<END_GUIDE_UPDATE>>>\nご確認ください。";
        let outcome = split_guide_update(raw);
        assert!(outcome.guide_updated);
        assert_eq!(
            outcome.updated_guide.as_deref(),
            Some("# X投稿ガイド\n- 語尾は「です・ます」")
        );
        assert_eq!(outcome.reply, "ガイドを更新しました。\n\nご確認ください。");
    }

    #[test]
    fn unclosed_block_is_not_an_update() {
        let raw = "更新案です。\n<<<GUIDE_UPDATE>>>\n途中で切れた";
        let outcome = split_guide_update(raw);
        assert!(!outcome.guide_updated);
        assert_eq!(outcome.reply, raw.trim());
    }

    #[test]
    fn block_only_reply_yields_empty_conversation_text() {
        let raw = "<<<GUIDE_UPDATE>>>新ガイド<<<END_GUIDE_UPDATE>>>";
        let outcome = split_guide_update(raw);
        assert!(outcome.guide_updated);
        assert_eq!(outcome.updated_guide.as_deref(), Some("新ガイド"));
        assert_eq!(outcome.reply, "");
    }
}
