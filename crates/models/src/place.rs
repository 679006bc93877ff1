use serde::Deserialize;

use hbnb_core::{BaseModel, ModelError, ModelResult, impl_model};

/// A rentable place.
///
/// Links to its [`City`](crate::City) and owning [`User`](crate::User) by id,
/// and to [`Amenity`](crate::Amenity) records through `amenity_ids`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    base: BaseModel,
    #[serde(default)]
    city_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    number_rooms: Option<i64>,
    #[serde(default)]
    number_bathrooms: Option<i64>,
    #[serde(default)]
    max_guest: Option<i64>,
    #[serde(default)]
    price_by_night: Option<i64>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    amenity_ids: Option<Vec<String>>,
}

impl Place {
    pub fn city_id(&self) -> &str {
        self.city_id.as_deref().unwrap_or_default()
    }

    pub fn set_city_id(&mut self, city_id: impl Into<String>) {
        self.city_id = Some(city_id.into());
    }

    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or_default()
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn number_rooms(&self) -> i64 {
        self.number_rooms.unwrap_or_default()
    }

    pub fn set_number_rooms(&mut self, number_rooms: i64) {
        self.number_rooms = Some(number_rooms);
    }

    pub fn number_bathrooms(&self) -> i64 {
        self.number_bathrooms.unwrap_or_default()
    }

    pub fn set_number_bathrooms(&mut self, number_bathrooms: i64) {
        self.number_bathrooms = Some(number_bathrooms);
    }

    pub fn max_guest(&self) -> i64 {
        self.max_guest.unwrap_or_default()
    }

    pub fn set_max_guest(&mut self, max_guest: i64) {
        self.max_guest = Some(max_guest);
    }

    pub fn price_by_night(&self) -> i64 {
        self.price_by_night.unwrap_or_default()
    }

    pub fn set_price_by_night(&mut self, price_by_night: i64) {
        self.price_by_night = Some(price_by_night);
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or_default()
    }

    /// Fails on NaN or infinity, which have no JSON form.
    pub fn set_latitude(&mut self, latitude: f64) -> ModelResult<()> {
        self.latitude = Some(finite("latitude", latitude)?);
        Ok(())
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or_default()
    }

    /// Fails on NaN or infinity, which have no JSON form.
    pub fn set_longitude(&mut self, longitude: f64) -> ModelResult<()> {
        self.longitude = Some(finite("longitude", longitude)?);
        Ok(())
    }

    pub fn amenity_ids(&self) -> &[String] {
        self.amenity_ids.as_deref().unwrap_or_default()
    }

    /// Link an amenity; ids already present are not repeated.
    pub fn add_amenity(&mut self, amenity_id: impl Into<String>) {
        let amenity_id = amenity_id.into();
        let ids = self.amenity_ids.get_or_insert_with(Vec::new);
        if !ids.contains(&amenity_id) {
            ids.push(amenity_id);
        }
    }
}

fn finite(attribute: &str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::validation(format!(
            "{attribute} must be a finite number, got {value}"
        )))
    }
}

impl_model!(Place, "Place" {
    city_id,
    user_id,
    name,
    description,
    number_rooms,
    number_bathrooms,
    max_guest,
    price_by_night,
    latitude,
    longitude,
    amenity_ids,
});

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{Model, ModelKind};
    use serde_json::json;

    #[test]
    fn numeric_defaults() {
        let place = Place::default();
        assert_eq!(place.number_rooms(), 0);
        assert_eq!(place.price_by_night(), 0);
        assert_eq!(place.latitude(), 0.0);
        assert!(place.amenity_ids().is_empty());
        assert!(!place.to_dict().contains_key("amenity_ids"));
    }

    #[test]
    fn typed_attributes_serialize_as_json_numbers_and_lists() {
        let mut place = Place::default();
        place.set_number_rooms(3);
        place.set_latitude(37.77).unwrap();
        place.add_amenity("wifi");
        place.add_amenity("wifi");
        place.add_amenity("pool");

        let dict = place.to_dict();
        assert_eq!(dict["number_rooms"], json!(3));
        assert_eq!(dict["latitude"], json!(37.77));
        assert_eq!(dict["amenity_ids"], json!(["wifi", "pool"]));
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let attributes = json!({"id": "p1", "latitude": 0, "longitude": -122});
        let place = Place::from_dict(attributes.as_object().unwrap().clone()).unwrap();
        assert_eq!(place.longitude(), -122.0);
    }

    #[test]
    fn mistyped_declared_attribute_is_rejected() {
        let attributes = json!({"id": "p1", "number_rooms": "three"});
        let err = Place::from_dict(attributes.as_object().unwrap().clone()).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn round_trip_preserves_every_attribute() {
        let mut place = Place::default();
        place.set_city_id("c1");
        place.set_user_id("u1");
        place.set_name("Loft");
        place.set_description("Sunny");
        place.set_number_bathrooms(2);
        place.set_max_guest(4);
        place.set_price_by_night(120);
        place.set_longitude(-122.42).unwrap();
        place.add_amenity("a1");

        let rebuilt = Place::from_dict(place.to_dict()).unwrap();
        assert_eq!(rebuilt.to_dict(), place.to_dict());
        assert_eq!(rebuilt, place);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut place = Place::default();
        place.set_latitude(12.5).unwrap();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = place.set_latitude(bad).unwrap_err();
            assert!(matches!(err, ModelError::Validation(_)), "{bad}");
            let err = place.set_longitude(bad).unwrap_err();
            assert!(matches!(err, ModelError::Validation(_)), "{bad}");
        }

        assert_eq!(place.latitude(), 12.5);
        assert!(!place.to_dict().contains_key("longitude"));
        let dict = place.to_dict();
        assert_eq!(Place::from_dict(dict.clone()).unwrap().to_dict(), dict);
    }
}
