use serde::Deserialize;

use hbnb_core::{BaseModel, impl_model};

/// A user's review of a place.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    base: BaseModel,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl Review {
    pub fn place_id(&self) -> &str {
        self.place_id.as_deref().unwrap_or_default()
    }

    pub fn set_place_id(&mut self, place_id: impl Into<String>) {
        self.place_id = Some(place_id.into());
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or_default()
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

impl_model!(Review, "Review" { place_id, user_id, text });
