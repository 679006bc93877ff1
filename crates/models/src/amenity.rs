use serde::Deserialize;

use hbnb_core::{BaseModel, impl_model};

/// Something a place offers (wifi, parking, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    base: BaseModel,
    #[serde(default)]
    name: Option<String>,
}

impl Amenity {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl_model!(Amenity, "Amenity" { name });
