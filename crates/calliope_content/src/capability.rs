//! Environment-derived backend capability flags.

use calliope_interface::BackendKind;

/// Which generation backends are enabled for the current process.
///
/// A backend counts as enabled only when its opt-in flag is `"true"` and its
/// credential is non-empty. Callers recompute this per request from the
/// process environment; it is never cached beyond process lifetime.
///
/// # Examples
///
/// ```
/// use calliope_content::BackendCapability;
/// use calliope_interface::BackendKind;
///
/// let capability = BackendCapability::new(true, false);
/// assert!(capability.enabled(BackendKind::Claude));
/// assert!(!capability.enabled(BackendKind::Gemini));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendCapability {
    claude: bool,
    gemini: bool,
}

impl BackendCapability {
    /// Capability with explicit flags.
    pub fn new(claude: bool, gemini: bool) -> Self {
        Self { claude, gemini }
    }

    /// Capability with no backend enabled; every task goes to the mocks.
    pub fn none() -> Self {
        Self::default()
    }

    /// Read the capability flags from the process environment.
    ///
    /// Claude is enabled iff `USE_CLAUDE_API=true` and `CLAUDE_API_KEY` is
    /// non-empty; Gemini iff `USE_GEMINI_API=true` and `GEMINI_API_KEY` is
    /// non-empty.
    pub fn from_env() -> Self {
        Self {
            claude: flag_and_credential("USE_CLAUDE_API", "CLAUDE_API_KEY"),
            gemini: flag_and_credential("USE_GEMINI_API", "GEMINI_API_KEY"),
        }
    }

    /// Whether the given backend is enabled.
    pub fn enabled(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::Claude => self.claude,
            BackendKind::Gemini => self.gemini,
        }
    }
}

fn flag_and_credential(flag: &str, credential: &str) -> bool {
    let flag_on = std::env::var(flag).is_ok_and(|v| v == "true");
    let has_credential = std::env::var(credential).is_ok_and(|v| !v.is_empty());
    flag_on && has_credential
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags() {
        let capability = BackendCapability::new(false, true);
        assert!(!capability.enabled(BackendKind::Claude));
        assert!(capability.enabled(BackendKind::Gemini));
        assert!(!BackendCapability::none().enabled(BackendKind::Claude));
    }
}
