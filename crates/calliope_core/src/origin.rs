//! Result origin tracking.

use serde::{Deserialize, Serialize};

/// Where a generation result came from.
///
/// Backend attempts that fail are logged and recovered internally; the only
/// caller-visible trace is this origin marker on the final result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Produced by a live generation backend
    #[display("backend")]
    Backend,
    /// Synthesized locally by the deterministic mock generators
    #[display("mock")]
    Mock,
}

/// A well-formed generation result together with its origin.
///
/// # Examples
///
/// ```
/// use calliope_core::{Generated, Origin};
///
/// let result = Generated::mock(vec![1, 2, 3]);
/// assert_eq!(result.origin, Origin::Mock);
/// assert_eq!(result.value.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated<T> {
    /// The generated value
    pub value: T,
    /// Whether a backend or the mocks produced it
    pub origin: Origin,
}

impl<T> Generated<T> {
    /// Wrap a backend-produced value.
    pub fn backend(value: T) -> Self {
        Self {
            value,
            origin: Origin::Backend,
        }
    }

    /// Wrap a mock-produced value.
    pub fn mock(value: T) -> Self {
        Self {
            value,
            origin: Origin::Mock,
        }
    }

    /// Map the inner value, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            value: f(self.value),
            origin: self.origin,
        }
    }
}
