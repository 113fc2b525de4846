// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the cascade-rx stream utilities.
//!
//! [`CascadeError`] is the single error type carried inside
//! [`StreamItem::Error`](crate::StreamItem::Error). The cascade executor only ever
//! introduces [`CascadeError::AllStrategiesFailed`] and
//! [`CascadeError::UnknownStrategy`]; the remaining variants carry failures raised
//! by strategies, operators and user callbacks.
//!
//! # Examples
//!
//! ```
//! use cascade_core::{CascadeError, Result};
//!
//! fn lookup_cache() -> Result<u32> {
//!     Err(CascadeError::stream_error("cache is cold"))
//! }
//!
//! assert!(lookup_cache().is_err());
//! ```

/// Root error type for all cascade-rx operations.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    /// Every strategy listed for a cascade was attempted and failed, or the list
    /// was empty.
    ///
    /// The individual strategy failures are intentionally not carried here.
    #[error("All strategies failed")]
    AllStrategiesFailed,

    /// A cascade referenced a strategy name absent from its strategy map.
    #[error("Unknown strategy: {name}")]
    UnknownStrategy {
        /// Debug rendering of the missing strategy name
        name: String,
    },

    /// A manipulation patch and its accumulator disagree on shape.
    #[error("Type mismatch: {context}")]
    TypeMismatch {
        /// Which shapes were expected
        context: String,
    },

    /// Stream processing encountered an error
    ///
    /// General failure for strategies and operators that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided strategies and callbacks.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CascadeError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a type mismatch error with the given context
    pub fn type_mismatch(context: impl Into<String>) -> Self {
        Self::TypeMismatch {
            context: context.into(),
        }
    }

    /// Create an unknown strategy error naming the missing key
    pub fn unknown_strategy(name: impl core::fmt::Debug) -> Self {
        Self::UnknownStrategy {
            name: format!("{name:?}"),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Returns `true` for [`CascadeError::AllStrategiesFailed`].
    #[must_use]
    pub const fn is_all_strategies_failed(&self) -> bool {
        matches!(self, Self::AllStrategiesFailed)
    }

    /// Check if this error indicates a programming error rather than a runtime failure
    ///
    /// Unknown strategy names and shape mismatches will fail the same way on every
    /// attempt.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::UnknownStrategy { .. } | Self::TypeMismatch { .. }
        )
    }
}

/// Specialized Result type for cascade-rx operations
///
/// # Examples
///
/// ```
/// use cascade_core::Result;
///
/// fn fetch() -> Result<String> {
///     Ok("fetched".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Extension trait for converting foreign errors into `CascadeError`
pub trait IntoCascadeError {
    /// Convert this error into a `CascadeError` with additional context
    fn into_cascade_error(self, context: &str) -> CascadeError;

    /// Convert this error into a `CascadeError` without additional context
    fn into_cascade(self) -> CascadeError
    where
        Self: Sized,
    {
        self.into_cascade_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoCascadeError for E {
    fn into_cascade_error(self, context: &str) -> CascadeError {
        if context.is_empty() {
            CascadeError::user_error(self)
        } else {
            CascadeError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(CascadeError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(CascadeError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CascadeError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            CascadeError::UserError(inner) => CascadeError::StreamProcessingError {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl Clone for CascadeError {
    fn clone(&self) -> Self {
        match self {
            Self::AllStrategiesFailed => Self::AllStrategiesFailed,
            Self::UnknownStrategy { name } => Self::UnknownStrategy { name: name.clone() },
            Self::TypeMismatch { context } => Self::TypeMismatch {
                context: context.clone(),
            },
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source can't be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("upstream timed out")]
    struct UpstreamError;

    #[test]
    fn all_strategies_failed_message() {
        assert_eq!(
            CascadeError::AllStrategiesFailed.to_string(),
            "All strategies failed"
        );
        assert!(CascadeError::AllStrategiesFailed.is_all_strategies_failed());
    }

    #[test]
    fn unknown_strategy_uses_debug_name() {
        let error = CascadeError::unknown_strategy("remote");
        assert_eq!(error.to_string(), "Unknown strategy: \"remote\"");
        assert!(error.is_permanent());
    }

    #[test]
    fn context_rewrites_user_errors() {
        let result: std::result::Result<(), CascadeError> =
            Err(CascadeError::user_error(UpstreamError));

        let error = result.context("loading profile").unwrap_err();

        assert!(matches!(
            error,
            CascadeError::StreamProcessingError { ref context }
                if context == "loading profile: upstream timed out"
        ));
    }

    #[test]
    fn context_keeps_cascade_errors() {
        let result: std::result::Result<(), CascadeError> = Err(CascadeError::AllStrategiesFailed);

        let error = result.with_context(|| "unused".to_string()).unwrap_err();

        assert!(error.is_all_strategies_failed());
    }

    #[test]
    fn clone_degrades_user_error_to_message() {
        let error = UpstreamError.into_cascade();

        let cloned = error.clone();

        assert!(matches!(error, CascadeError::UserError(_)));
        assert!(matches!(
            cloned,
            CascadeError::StreamProcessingError { ref context }
                if context == "User error: upstream timed out"
        ));
    }
}
