//! `hbnb-core`: model foundation building blocks.
//!
//! Identity, timestamps and the dictionary contract shared by every model,
//! plus the [`ObjectStore`] seam a storage engine implements. No file IO
//! happens here.

pub mod attributes;
pub mod entity;
pub mod error;
pub mod handle;
pub mod id;
pub mod registry;
pub mod store;
pub mod timestamp;

pub use attributes::{AttributeMap, CLASS_KEY};
pub use entity::{BaseModel, Model, ModelKind};
pub use error::{ModelError, ModelResult};
pub use handle::{Handle, SharedModel};
pub use id::ModelId;
pub use registry::ClassRegistry;
pub use serde_json::Value;
pub use store::{ObjectStore, StoreError, StoreResult, storage_key};
pub use timestamp::Timestamp;
