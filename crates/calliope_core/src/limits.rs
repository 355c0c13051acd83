//! Fixed posting time slots and article length limits.

use crate::NoteKind;

/// Ordered X posting times. Slot `i` uses `X_POST_TIMES[i]`; overflow slots
/// beyond the list fall back to [`OVERFLOW_TIME`].
pub const X_POST_TIMES: [&str; 3] = ["07:30", "12:30", "21:00"];

/// Time assigned to X slots beyond the fixed list.
pub const OVERFLOW_TIME: &str = "12:00";

/// The single Threads posting time. NOTE articles have no per-post slot.
pub const THREADS_TIME: &str = "10:00";

/// Maximum character count for a NOTE article of the given kind.
///
/// Premium paid articles may run to 5000 characters; the standard paid limit
/// is returned here.
pub fn article_character_limit(kind: NoteKind) -> usize {
    match kind {
        NoteKind::FreeNoAffiliate => 2000,
        NoteKind::FreeWithAffiliate => 3000,
        NoteKind::Membership => 2000,
        NoteKind::Paid => 2000,
    }
}
