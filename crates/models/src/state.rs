use serde::Deserialize;

use hbnb_core::{BaseModel, impl_model};

/// A state (administrative region) that cities belong to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct State {
    #[serde(flatten)]
    base: BaseModel,
    #[serde(default)]
    name: Option<String>,
}

impl State {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl_model!(State, "State" { name });
