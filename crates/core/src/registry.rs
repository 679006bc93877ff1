//! Class-name registry used to rebuild stored records.

use std::collections::BTreeMap;

use crate::attributes::AttributeMap;
use crate::entity::ModelKind;
use crate::error::{ModelError, ModelResult};
use crate::handle::{Handle, SharedModel};

type Rebuild = fn(AttributeMap) -> ModelResult<SharedModel>;

fn rebuild<M: ModelKind>(attributes: AttributeMap) -> ModelResult<SharedModel> {
    Ok(Handle::new(M::from_dict(attributes)?).erase())
}

/// Known model classes, keyed by class name.
#[derive(Clone, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<&'static str, Rebuild>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `M` under [`ModelKind::CLASS_NAME`].
    pub fn register<M: ModelKind>(&mut self) -> &mut Self {
        self.classes.insert(M::CLASS_NAME, rebuild::<M>);
        self
    }

    pub fn with<M: ModelKind>(mut self) -> Self {
        self.register::<M>();
        self
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.keys().copied()
    }

    /// Rebuild a `class_name` model from its dictionary form.
    pub fn construct(&self, class_name: &str, attributes: AttributeMap) -> ModelResult<SharedModel> {
        let build = self
            .classes
            .get(class_name)
            .copied()
            .ok_or_else(|| ModelError::unknown_class(class_name))?;
        build(attributes)
    }
}

impl core::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.classes.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BaseModel;
    use serde_json::json;

    #[test]
    fn construct_dispatches_on_class_name() {
        let registry = ClassRegistry::new().with::<BaseModel>();
        let attributes = json!({"id": "7", "created_at": "2023-01-01T10:00:00.000000"});

        let model = registry
            .construct("BaseModel", attributes.as_object().unwrap().clone())
            .unwrap();
        assert_eq!(model.key(), "BaseModel.7");
    }

    #[test]
    fn unknown_class_is_a_lookup_error() {
        let registry = ClassRegistry::new().with::<BaseModel>();
        let err = registry.construct("Spaceship", AttributeMap::new()).unwrap_err();
        assert_eq!(err, ModelError::UnknownClass("Spaceship".to_string()));
    }

    #[test]
    fn names_are_listed() {
        let registry = ClassRegistry::new().with::<BaseModel>();
        assert!(registry.contains("BaseModel"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["BaseModel"]);
    }
}
