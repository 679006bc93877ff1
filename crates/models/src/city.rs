use serde::Deserialize;

use hbnb_core::{BaseModel, impl_model};

/// A city, linked to its [`State`](crate::State) by id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct City {
    #[serde(flatten)]
    base: BaseModel,
    #[serde(default)]
    state_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl City {
    pub fn state_id(&self) -> &str {
        self.state_id.as_deref().unwrap_or_default()
    }

    pub fn set_state_id(&mut self, state_id: impl Into<String>) {
        self.state_id = Some(state_id.into());
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl_model!(City, "City" { state_id, name });
