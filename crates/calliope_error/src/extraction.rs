//! Structured-response extraction error types.

/// Kinds of extraction failures.
///
/// Both variants are recoverable: the orchestrator treats either as a failed
/// backend attempt and proceeds to the mock fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// No opening bracket/brace of the requested shape was found in the response.
    #[display("No JSON found in response ({} bytes)", _0)]
    NoJsonFound(usize),
    /// A candidate substring was found but could not be parsed even after repair.
    ///
    /// Carries the original (pre-repair) text for diagnostics.
    #[display("Unrepairable JSON in response: {}", preview)]
    Unrepairable {
        /// First characters of the original text, for log output
        preview: String,
        /// The full original response text
        original: String,
    },
}

/// Extraction error with location tracking.
///
/// # Examples
///
/// ```
/// use calliope_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::NoJsonFound(42));
/// assert!(format!("{}", err).contains("No JSON found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The kind of error that occurred
    pub kind: ExtractionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new extraction error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an `Unrepairable` error from the original response text.
    #[track_caller]
    pub fn unrepairable(original: impl Into<String>) -> Self {
        let original = original.into();
        let preview = original.chars().take(80).collect();
        Self::new(ExtractionErrorKind::Unrepairable { preview, original })
    }
}
