//! Domain models for the hbnb listings store.
//!
//! Every type here embeds [`BaseModel`] and adds a fixed set of declared
//! attributes. Declared attributes start unassigned; they read as the type's
//! default and only appear in [`Model::to_dict`](hbnb_core::Model::to_dict)
//! once set.

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use city::City;
pub use hbnb_core::BaseModel;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;

use hbnb_core::ClassRegistry;

/// Registry of every class a storage file may name.
pub fn registry() -> ClassRegistry {
    ClassRegistry::new()
        .with::<BaseModel>()
        .with::<User>()
        .with::<State>()
        .with::<City>()
        .with::<Amenity>()
        .with::<Place>()
        .with::<Review>()
}
