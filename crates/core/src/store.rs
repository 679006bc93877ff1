//! The seam between models and the storage engine.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::error::ModelError;
use crate::handle::SharedModel;

pub type StoreResult<T> = Result<T, StoreError>;

/// What a model needs from the storage engine: registration of fresh models
/// and a full flush on save.
pub trait ObjectStore: Send + Sync {
    /// Insert `object` under its storage key, replacing any previous entry.
    fn register(&self, object: SharedModel);

    /// Persist every registered object.
    fn flush(&self) -> StoreResult<()>;
}

impl<S> ObjectStore for Arc<S>
where
    S: ObjectStore + ?Sized,
{
    fn register(&self, object: SharedModel) {
        (**self).register(object)
    }

    fn flush(&self) -> StoreResult<()> {
        (**self).flush()
    }
}

/// `"<ClassName>.<id>"`
pub fn storage_key(class_name: &str, id: &str) -> String {
    format!("{class_name}.{id}")
}

/// Storage engine failure.
///
/// - **Io**: the storage file could not be read or written
/// - **Parse**: the storage file is not valid JSON
/// - **Malformed**: valid JSON, but not shaped like a storage file
/// - **Model**: a record could not be rebuilt (unknown class, bad attribute)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed storage file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("cannot rebuild record '{key}': {source}")]
    Model {
        key: String,
        #[source]
        source: ModelError,
    },
}

impl StoreError {
    /// Returns true if a record named a class the store does not know.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Model { source, .. } if source.is_lookup())
    }
}
