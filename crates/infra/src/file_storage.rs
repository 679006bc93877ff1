//! Whole-file JSON storage engine.
//!
//! Every live object sits in one in-memory table keyed by `"<ClassName>.<id>"`.
//! A flush rewrites the entire table to a single JSON document; a reload
//! replaces the entire table with what that document holds.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hbnb_core::{
    AttributeMap, CLASS_KEY, ClassRegistry, ObjectStore, SharedModel, StoreError, StoreResult,
    Value, storage_key,
};
use tempfile::NamedTempFile;

use crate::config::StorageConfig;

/// Storage key → live object.
pub type ObjectTable = BTreeMap<String, SharedModel>;

/// JSON-file-backed object store.
///
/// Single process, single writer. Flushes replace the file atomically (write to
/// a temporary file in the same directory, fsync, rename), so readers see
/// either the previous document or the new one.
pub struct FileStorage {
    path: PathBuf,
    classes: ClassRegistry,
    objects: RwLock<ObjectTable>,
}

impl FileStorage {
    /// Empty store persisting to `path`. Nothing is read until [`reload`](Self::reload).
    pub fn new(path: impl Into<PathBuf>, classes: ClassRegistry) -> Self {
        Self {
            path: path.into(),
            classes,
            objects: RwLock::new(ObjectTable::new()),
        }
    }

    /// Build a store from `config` and reload it from disk.
    pub fn open(config: &StorageConfig, classes: ClassRegistry) -> StoreResult<Self> {
        let storage = Self::new(config.path.clone(), classes);
        storage.reload()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Every stored object. The handles alias the live objects.
    pub fn all(&self) -> ObjectTable {
        self.table().clone()
    }

    /// Objects whose runtime class is `class_name`.
    pub fn all_of(&self, class_name: &str) -> Vec<SharedModel> {
        self.table()
            .values()
            .filter(|object| object.read().class_name() == class_name)
            .cloned()
            .collect()
    }

    pub fn get(&self, class_name: &str, id: &str) -> Option<SharedModel> {
        self.table().get(&storage_key(class_name, id)).cloned()
    }

    /// Number of stored objects, optionally restricted to one class.
    pub fn count(&self, class_name: Option<&str>) -> usize {
        match class_name {
            Some(class_name) => self.all_of(class_name).len(),
            None => self.table().len(),
        }
    }

    /// Drop an object from the table. The file changes on the next flush.
    pub fn remove(&self, class_name: &str, id: &str) -> Option<SharedModel> {
        let key = storage_key(class_name, id);
        let removed = self.table_mut().remove(&key);
        if removed.is_some() {
            tracing::debug!(%key, "object removed");
        }
        removed
    }

    /// Replace the table with the contents of the storage file.
    ///
    /// A missing file is not an error and leaves the table as it is. Unknown
    /// class names, malformed records and invalid JSON abort the whole reload;
    /// the table is only swapped once every record has been rebuilt.
    pub fn reload(&self) -> StoreResult<()> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "storage file not found; nothing to reload");
                return Ok(());
            }
            Err(err) => return Err(self.io_error("read", err)),
        };

        let document: Value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let Value::Object(records) = document else {
            return Err(self.malformed("top-level value is not an object".to_string()));
        };

        let mut table = ObjectTable::new();
        for (key, record) in records {
            let Value::Object(mut attributes) = record else {
                return Err(self.malformed(format!("record '{key}' is not an object")));
            };
            let class_name = match attributes.remove(CLASS_KEY) {
                Some(Value::String(name)) => name,
                Some(_) => {
                    return Err(self.malformed(format!("record '{key}' has a non-string {CLASS_KEY}")));
                }
                None => return Err(self.malformed(format!("record '{key}' has no {CLASS_KEY}"))),
            };
            let object = self
                .classes
                .construct(&class_name, attributes)
                .map_err(|source| StoreError::Model {
                    key: key.clone(),
                    source,
                })?;
            table.insert(key, object);
        }

        let count = table.len();
        *self.table_mut() = table;
        tracing::info!(path = %self.path.display(), objects = count, "storage reloaded");
        Ok(())
    }

    fn document(&self) -> AttributeMap {
        self.table()
            .iter()
            .map(|(key, object)| (key.clone(), Value::Object(object.to_dict())))
            .collect()
    }

    fn write_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)
            .map_err(|err| self.io_error("create a temporary file for", err))?;
        file.write_all(bytes)
            .map_err(|err| self.io_error("write", err))?;
        file.as_file()
            .sync_all()
            .map_err(|err| self.io_error("sync", err))?;
        file.persist(&self.path)
            .map_err(|err| self.io_error("replace", err.error))?;
        Ok(())
    }

    fn table(&self) -> RwLockReadGuard<'_, ObjectTable> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_mut(&self) -> RwLockWriteGuard<'_, ObjectTable> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn io_error(&self, action: &'static str, source: io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }

    fn malformed(&self, reason: String) -> StoreError {
        StoreError::Malformed {
            path: self.path.clone(),
            reason,
        }
    }
}

impl ObjectStore for FileStorage {
    fn register(&self, object: SharedModel) {
        let key = object.key();
        tracing::debug!(%key, "object registered");
        self.table_mut().insert(key, object);
    }

    fn flush(&self) -> StoreResult<()> {
        let document = self.document();
        let count = document.len();
        let bytes = serde_json::to_vec(&Value::Object(document))
            .map_err(|err| self.io_error("serialize", err.into()))?;
        self.write_atomically(&bytes)?;
        tracing::info!(path = %self.path.display(), objects = count, "storage flushed");
        Ok(())
    }
}

impl core::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .field("classes", &self.classes)
            .field("objects", &self.table().len())
            .finish()
    }
}
