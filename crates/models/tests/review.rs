//! Review lifecycle against a real file storage.

use std::fs;
use std::thread::sleep;
use std::time::Duration;

use hbnb_core::{AttributeMap, Model, ModelError, ModelKind, ObjectStore, Value};
use hbnb_infra::FileStorage;
use hbnb_models::{Review, registry};
use serde_json::json;
use tempfile::{TempDir, tempdir};

fn storage_in(dir: &TempDir) -> FileStorage {
    FileStorage::new(dir.path().join("file.json"), registry())
}

fn mapping(value: Value) -> AttributeMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn new_review_is_stored() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);

    let review = Review::create(&storage);

    let all = storage.all();
    assert!(all.values().any(|object| object.ptr_eq(&review)));
    assert!(all.contains_key(&review.key()));
}

#[test]
fn new_review_has_identity_and_timestamps() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);

    let review = Review::create(&storage);
    let review = review.read();

    assert!(!review.id().as_str().is_empty());
    assert!(review.base().created_at() <= review.base().updated_at());
    assert_eq!(review.place_id(), "");
    assert_eq!(review.user_id(), "");
    assert_eq!(review.text(), "");
}

#[test]
fn two_reviews_have_unique_ids() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);

    let first = Review::create(&storage);
    let second = Review::create(&storage);

    assert_ne!(first.read().id(), second.read().id());
    assert_eq!(storage.count(Some("Review")), 2);
}

#[test]
fn later_reviews_have_later_timestamps() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);

    let first = Review::create(&storage);
    sleep(Duration::from_millis(50));
    let second = Review::create(&storage);

    let (first, second) = (first.read(), second.read());
    assert!(first.base().created_at() < second.base().created_at());
    assert!(first.base().updated_at() < second.base().updated_at());
}

#[test]
fn display_names_class_and_id() {
    let review = Review::from_dict(mapping(json!({
        "id": "123456",
        "created_at": "2023-01-01T10:00:00.000000",
        "updated_at": "2023-01-01T10:00:00.000000"
    })))
    .unwrap();

    let text = review.to_string();
    assert!(text.starts_with("[Review] (123456) {"));
    assert!(text.contains("\"id\": \"123456\""));
    assert!(text.contains(&format!("\"created_at\": {:?}", review.base().created_at())));
    assert!(text.contains(&format!("\"updated_at\": {:?}", review.base().updated_at())));
}

#[test]
fn reconstructed_review_is_not_registered() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let attributes = mapping(json!({
        "id": "345",
        "created_at": "2023-01-01T10:00:00.000000",
        "updated_at": "2023-01-01T10:00:00.000000"
    }));

    let review = Review::construct(attributes, &storage).unwrap();

    {
        let review = review.read();
        assert_eq!(review.id(), "345");
        assert_eq!(review.base().created_at(), review.base().updated_at());
        assert_eq!(
            review.to_dict()["created_at"],
            json!("2023-01-01T10:00:00.000000")
        );
    }
    assert!(!storage.all().contains_key("Review.345"));

    storage.register(review.erase());
    assert!(storage.all().contains_key("Review.345"));
}

#[test]
fn null_identity_is_rejected() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let attributes = mapping(json!({
        "id": null,
        "created_at": null,
        "updated_at": null
    }));

    let err = Review::construct(attributes, &storage).unwrap_err();

    assert!(matches!(err, ModelError::Validation(_)), "{err}");
    assert_eq!(storage.count(None), 0);
}

#[test]
fn save_updates_timestamp_and_writes_file() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let review = Review::create(&storage);
    let before = review.read().base().updated_at();
    sleep(Duration::from_millis(50));

    review.save(&storage).unwrap();

    assert!(review.read().base().updated_at() > before);
    let written = fs::read_to_string(storage.path()).unwrap();
    assert!(written.contains(&review.key()));
}

#[test]
fn two_saves_keep_moving_updated_at() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let review = Review::create(&storage);
    let created_at = review.read().base().created_at();
    let initial = review.read().base().updated_at();

    sleep(Duration::from_millis(50));
    review.save(&storage).unwrap();
    let first = review.read().base().updated_at();

    sleep(Duration::from_millis(50));
    review.save(&storage).unwrap();
    let second = review.read().base().updated_at();

    assert!(initial < first);
    assert!(first < second);
    assert_eq!(review.read().base().created_at(), created_at);

    let reloaded = storage_in(&dir);
    reloaded.reload().unwrap();
    let restored = reloaded.get("Review", review.read().id().as_str()).unwrap();
    assert_eq!(restored.to_dict(), review.to_dict());
}

#[test]
fn to_dict_has_base_keys_and_string_timestamps() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let review = Review::create(&storage);
    review.write().set_text("Quiet and clean");

    let dict = review.to_dict();

    let mut keys: Vec<_> = dict.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["__class__", "created_at", "id", "text", "updated_at"]);
    assert_eq!(dict["__class__"], "Review");
    assert!(dict["created_at"].is_string());
    assert!(dict["updated_at"].is_string());
    assert_eq!(dict["text"], "Quiet and clean");
}

#[test]
fn to_dict_output_matches_saved_form() {
    let review = Review::from_dict(mapping(json!({
        "id": "123456",
        "created_at": "2023-01-01T10:00:00.000000",
        "updated_at": "2023-01-01T10:00:00.000000",
        "place_id": "p-1"
    })))
    .unwrap();

    assert_eq!(
        Value::Object(review.to_dict()),
        json!({
            "id": "123456",
            "__class__": "Review",
            "created_at": "2023-01-01T10:00:00.000000",
            "updated_at": "2023-01-01T10:00:00.000000",
            "place_id": "p-1"
        })
    );
}

#[test]
fn extra_attributes_survive_a_reload() {
    let dir = tempdir().unwrap();
    let storage = storage_in(&dir);
    let review = Review::create(&storage);
    review
        .write()
        .set_attribute("rating", json!(5))
        .unwrap();
    storage.flush().unwrap();

    let reloaded = storage_in(&dir);
    reloaded.reload().unwrap();

    let restored = reloaded.get("Review", review.read().id().as_str()).unwrap();
    assert_eq!(restored.to_dict(), review.to_dict());
    assert_eq!(restored.read().base().extra_attribute("rating"), Some(&json!(5)));
}
