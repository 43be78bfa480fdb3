// Error types for uilist

use thiserror::Error;

/// Result type alias for uilist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using uilist
#[derive(Debug, Error)]
pub enum Error {
    /// List is not usable as configured
    ///
    /// Raised when a list is refreshed without an item factory registered.
    /// This is a hard defect in the calling test code, never retried; the
    /// previously materialized items (if any) are left untouched.
    #[error("List misconfigured: {0}")]
    Configuration(String),

    /// Invalid argument provided to method
    ///
    /// Raised for programming errors such as a negative expected size in a
    /// size assertion, or an invalid regex pattern. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A previously valid element handle no longer points at a live node
    ///
    /// Backends must map their driver's stale/detached failures to this
    /// variant so the list's single-shot recovery can recognize them.
    #[error("Stale element reference: {0}")]
    Stale(String),

    /// Element not found by the backend query
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Positional access past the end of the materialized list
    #[error("Index {index} out of range for list of {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A lookup or collection assertion stayed unsatisfied for the whole
    /// retry budget
    ///
    /// The message names the list and the criterion that was not met; a
    /// FAILED step has already been emitted through the reporter by the
    /// time this is returned.
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Opaque failure from the underlying browser-automation driver
    #[error("Backend error: {0}")]
    Backend(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true if this error (or its source chain) is a stale-reference
    /// failure eligible for the list's recovery path.
    pub fn is_stale(&self) -> bool {
        match self {
            Error::Stale(_) => true,
            Error::Context(_, inner) => inner.is_stale(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stale_sees_through_context() {
        let err = Error::Stale("node detached".into()).context("clicking row");
        assert!(err.is_stale());
        assert!(!Error::Backend("boom".into()).is_stale());
    }
}
