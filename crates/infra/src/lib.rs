//! Infrastructure layer: storage configuration and the JSON file storage engine.

pub mod config;
pub mod file_storage;

pub use config::StorageConfig;
pub use file_storage::{FileStorage, ObjectTable};
