//! Entity base: identity, timestamps and the dictionary contract every model shares.

use core::any::Any;
use core::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::attributes::{self, AttributeMap, CLASS_KEY, CREATED_AT_KEY, ID_KEY, UPDATED_AT_KEY};
use crate::error::{ModelError, ModelResult};
use crate::handle::Handle;
use crate::id::ModelId;
use crate::store::{ObjectStore, storage_key};
use crate::timestamp::{self, Timestamp};

/// State shared by every model: id, creation/update timestamps and any
/// attributes the model's schema does not declare.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseModel {
    #[serde(default = "ModelId::generate")]
    id: ModelId,

    #[serde(default = "timestamp::now", deserialize_with = "timestamp::deserialize")]
    created_at: Timestamp,

    #[serde(default = "timestamp::now", deserialize_with = "timestamp::deserialize")]
    updated_at: Timestamp,

    /// Undeclared attributes, kept verbatim.
    #[serde(flatten)]
    extra: AttributeMap,
}

impl BaseModel {
    /// Fresh identity: new id, both timestamps from a single clock read.
    pub fn new() -> Self {
        let now = timestamp::now();
        Self {
            id: ModelId::generate(),
            created_at: now,
            updated_at: now,
            extra: AttributeMap::new(),
        }
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Set `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = timestamp::now();
    }

    pub fn extra(&self) -> &AttributeMap {
        &self.extra
    }

    pub fn extra_attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    fn write_identity(&self, attributes: &mut AttributeMap) {
        attributes.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        attributes.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.created_at)),
        );
        attributes.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.updated_at)),
        );
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// A persistable model.
///
/// Object safe: the storage engine holds models as `dyn Model`. Concrete types
/// normally get this impl from [`impl_model!`](crate::impl_model).
pub trait Model: Any + fmt::Debug + Send + Sync {
    /// Runtime class name, used in storage keys and in `__class__`.
    fn class_name(&self) -> &'static str;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    /// Write every declared attribute that has been assigned.
    fn write_declared(&self, attributes: &mut AttributeMap);

    /// Assign one attribute by name.
    ///
    /// Declared attributes are type-checked; any other name is stored as an
    /// extra attribute. `id`, `created_at`, `updated_at` and `__class__` are
    /// rejected, as is `null` for a declared attribute; an extra attribute may
    /// hold `null`. `updated_at` is left untouched.
    fn set_attribute(&mut self, key: &str, value: Value) -> ModelResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> &ModelId {
        self.base().id()
    }

    /// Storage key: `"<ClassName>.<id>"`.
    fn key(&self) -> String {
        storage_key(self.class_name(), self.id().as_str())
    }

    /// Dictionary form of the model.
    ///
    /// Returns a new mapping with the timestamps as fixed-format strings and
    /// `__class__` set to [`class_name`](Model::class_name).
    ///
    /// ```compile_fail
    /// use hbnb_core::{BaseModel, Model};
    /// fn dump(model: &BaseModel) {
    ///     let _ = model.to_dict(None::<()>);
    /// }
    /// ```
    fn to_dict(&self) -> AttributeMap {
        let base = self.base();
        let mut attributes = base.extra.clone();
        self.write_declared(&mut attributes);
        base.write_identity(&mut attributes);
        attributes.insert(
            CLASS_KEY.to_string(),
            Value::String(self.class_name().to_string()),
        );
        attributes
    }
}

/// Statically known model types: construction and reconstruction.
pub trait ModelKind: Model + Default + DeserializeOwned {
    const CLASS_NAME: &'static str;

    /// Create a fresh model and register it with `store`.
    fn create(store: &dyn ObjectStore) -> Handle<Self> {
        let handle = Handle::new(Self::default());
        store.register(handle.erase());
        handle
    }

    /// Rebuild a model from its dictionary form. Nothing is registered.
    ///
    /// `__class__` is ignored. Keys that are absent keep fresh defaults (new
    /// id, current time).
    fn from_dict(mut attributes: AttributeMap) -> ModelResult<Self> {
        attributes.remove(CLASS_KEY);
        Ok(serde_json::from_value(Value::Object(attributes))?)
    }

    /// An empty mapping creates and registers a fresh model. Otherwise the
    /// model is rebuilt from the mapping and not registered.
    fn construct(attributes: AttributeMap, store: &dyn ObjectStore) -> ModelResult<Handle<Self>> {
        if attributes.is_empty() {
            return Ok(Self::create(store));
        }
        Self::from_dict(attributes).map(Handle::new)
    }
}

/// Shared body of [`Model::set_attribute`]: re-reads the model from its
/// dictionary with `key` replaced.
pub fn assign<M: ModelKind>(model: &mut M, key: &str, value: Value) -> ModelResult<()> {
    if attributes::is_reserved(key) {
        return Err(ModelError::validation(format!(
            "attribute '{key}' cannot be assigned"
        )));
    }
    let clearing = value.is_null();
    let mut attributes = model.to_dict();
    attributes.insert(key.to_string(), value);
    let rebuilt = M::from_dict(attributes)?;
    // A null that did not land in `extra` was taken by a declared attribute.
    if clearing && !rebuilt.base().extra.contains_key(key) {
        return Err(ModelError::validation(format!(
            "declared attribute '{key}' cannot be null"
        )));
    }
    *model = rebuilt;
    Ok(())
}

/// `[<ClassName>] (<id>) {<attributes>}`; timestamps are shown unformatted.
pub fn render<M: Model + ?Sized>(model: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let base = model.base();
    write!(
        f,
        "[{}] ({}) {{\"id\": \"{}\", \"created_at\": {:?}, \"updated_at\": {:?}",
        model.class_name(),
        base.id,
        base.id,
        base.created_at,
        base.updated_at
    )?;
    let mut declared = AttributeMap::new();
    model.write_declared(&mut declared);
    for (key, value) in declared.iter().chain(base.extra.iter()) {
        write!(f, ", \"{key}\": {value}")?;
    }
    f.write_str("}")
}

impl fmt::Display for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

impl Model for BaseModel {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }

    fn write_declared(&self, _attributes: &mut AttributeMap) {}

    fn set_attribute(&mut self, key: &str, value: Value) -> ModelResult<()> {
        assign(self, key, value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ModelKind for BaseModel {
    const CLASS_NAME: &'static str = "BaseModel";
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// Implement [`Model`], [`ModelKind`] and `Display` for a model struct.
///
/// The struct needs a `base: BaseModel` field (flattened for serde), must
/// derive `Default` and `Deserialize`, and lists its declared attributes, each
/// an `Option<T>` with `T: Into<serde_json::Value>`.
///
/// ```ignore
/// impl_model!(City, "City" { state_id, name });
/// ```
#[macro_export]
macro_rules! impl_model {
    ($t:ident, $name:literal { $($field:ident),* $(,)? }) => {
        impl $crate::Model for $t {
            fn class_name(&self) -> &'static str {
                $name
            }

            fn base(&self) -> &$crate::BaseModel {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::BaseModel {
                &mut self.base
            }

            fn write_declared(&self, attributes: &mut $crate::AttributeMap) {
                $( $crate::attributes::put(attributes, stringify!($field), &self.$field); )*
            }

            fn set_attribute(
                &mut self,
                key: &str,
                value: $crate::Value,
            ) -> $crate::ModelResult<()> {
                $crate::entity::assign(self, key, value)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }
        }

        impl $crate::ModelKind for $t {
            const CLASS_NAME: &'static str = $name;
        }

        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::entity::render(self, f)
            }
        }
    };
}
