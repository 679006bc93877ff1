//! Domain error model.

use thiserror::Error;

/// Result type used across the model layer.
pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level error.
///
/// Covers failures that depend only on the data handed to a model (malformed
/// timestamps, mistyped attributes, unknown class names). Persistence failures
/// live in [`StoreError`](crate::store::StoreError).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An attribute value failed validation (e.g. malformed timestamp).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A class name does not name any known model type.
    #[error("unknown class: {0}")]
    UnknownClass(String),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_class(name: impl Into<String>) -> Self {
        Self::UnknownClass(name.into())
    }

    /// Returns true if this error came from a class-name lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownClass(_))
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
