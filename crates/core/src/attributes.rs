//! Attribute mappings: the dictionary form of a model.

use serde_json::Value;

/// String-keyed mapping of JSON values.
pub type AttributeMap = serde_json::Map<String, Value>;

pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";
/// Carries the runtime class name in serialized mappings.
pub const CLASS_KEY: &str = "__class__";

/// Keys owned by the base model; they cannot be assigned as plain attributes.
pub const RESERVED_KEYS: [&str; 4] = [ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY, CLASS_KEY];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Write a declared attribute into `attributes` if it has been assigned.
pub fn put<T>(attributes: &mut AttributeMap, key: &str, value: &Option<T>)
where
    T: Clone + Into<Value>,
{
    if let Some(v) = value {
        attributes.insert(key.to_string(), v.clone().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_values_are_skipped() {
        let mut attributes = AttributeMap::new();
        put::<String>(&mut attributes, "name", &None);
        put(&mut attributes, "max_guest", &Some(4_i64));
        put(&mut attributes, "amenity_ids", &Some(vec!["a".to_string()]));

        assert!(!attributes.contains_key("name"));
        assert_eq!(attributes["max_guest"], Value::from(4));
        assert_eq!(attributes["amenity_ids"], serde_json::json!(["a"]));
    }

    #[test]
    fn reserved_keys() {
        for key in RESERVED_KEYS {
            assert!(is_reserved(key));
        }
        assert!(!is_reserved("name"));
    }
}
