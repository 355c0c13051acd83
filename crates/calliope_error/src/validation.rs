//! Input validation error types.

/// Input validation error with source location.
///
/// Raised before any backend or mock dispatch when required task parameters
/// are missing or malformed. This is the one error class that is surfaced
/// directly to the external caller (a 4xx-equivalent), so the message should
/// name the offending parameter.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use calliope_error::ValidationError;
    ///
    /// let err = ValidationError::new("start_date is required");
    /// assert!(err.message.contains("start_date"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
