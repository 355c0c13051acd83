//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, ExtractionError, HttpError, JsonError, StorageError,
    ValidationError,
};

/// This is the foundation error enum. Each Calliope crate contributes the
/// variants for its own concern.
///
/// # Examples
///
/// ```
/// use calliope_error::{CalliopeError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CalliopeError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CalliopeErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generation backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Structured-response extraction error
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Input validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Document storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Calliope error with kind discrimination.
///
/// # Examples
///
/// ```
/// use calliope_error::{CalliopeResult, ConfigError};
///
/// fn might_fail() -> CalliopeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Calliope Error: {}", _0)]
pub struct CalliopeError(Box<CalliopeErrorKind>);

impl CalliopeError {
    /// Create a new error from a kind.
    pub fn new(kind: CalliopeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CalliopeErrorKind {
        &self.0
    }

    /// True when this error is a caller-visible input validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), CalliopeErrorKind::Validation(_))
    }
}

// Generic From implementation for any type that converts to CalliopeErrorKind
impl<T> From<T> for CalliopeError
where
    T: Into<CalliopeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Calliope operations.
///
/// # Examples
///
/// ```
/// use calliope_error::{CalliopeResult, HttpError};
///
/// fn fetch_data() -> CalliopeResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type CalliopeResult<T> = std::result::Result<T, CalliopeError>;
