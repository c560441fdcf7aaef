//! Error types for touchflow.
//!
//! This module defines the centralized error type [`TouchflowError`] and a type alias
//! [`Result`] used throughout the crate, plus [`RefreshError`], the opaque failure
//! returned by a caller-supplied refresh operation. Gesture handling itself never
//! fails: out-of-range navigation is a silent no-op and unsupported feedback
//! capabilities are ignored, so these errors only surface at construction,
//! configuration and replay boundaries.

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// The main error type for touchflow operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use touchflow::TouchflowError;
///
/// fn validate() -> Result<(), TouchflowError> {
///     Err(TouchflowError::Config("swipe.commit_threshold must be > 0".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum TouchflowError {
    /// Configuration is invalid.
    ///
    /// The string describes which value was rejected and why.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A swipe navigator was constructed over an empty collection.
    #[error("Invalid item count: {0} (a carousel needs at least one item)")]
    InvalidItemCount(usize),

    /// A replay script is structurally valid but semantically wrong.
    #[error("Script error: {0}")]
    Script(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON document could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for touchflow operations.
pub type Result<T> = std::result::Result<T, TouchflowError>;

/// Failure reported by a refresh operation.
///
/// The controller never interprets the cause; it only carries it back to the
/// caller through [`RefreshOutcome::Failed`](crate::refresh::RefreshOutcome::Failed).
pub struct RefreshError {
    source: Box<dyn StdError + 'static>,
}

impl RefreshError {
    /// Wraps any error (or anything convertible into a boxed error, such as a `String`).
    pub fn new(source: impl Into<Box<dyn StdError + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the underlying error.
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + 'static) {
        self.source.as_ref()
    }
}

impl fmt::Debug for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshError").field(&self.source).finish()
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl StdError for RefreshError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.source()
    }
}
