use serde_json::json;

use crate::applications::outcome::Outcome;
use crate::applications::store::StoreError;

#[test]
fn success_defaults_to_status_200() {
    let outcome = Outcome::success(json!({ "foo": "bar" }));
    assert!(outcome.success);
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.data, Some(json!({ "foo": "bar" })));
    assert_eq!(outcome.error, None);
}

#[test]
fn success_preserves_explicit_status() {
    let outcome = Outcome::success_with_status(json!([1, 2]), 201);
    assert!(outcome.success);
    assert_eq!(outcome.status, 201);
    assert_eq!(outcome.data, Some(json!([1, 2])));
}

#[test]
fn error_defaults_to_status_500() {
    let outcome = Outcome::error("Something went wrong");
    assert!(!outcome.success);
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.error.as_deref(), Some("Something went wrong"));
    assert_eq!(outcome.data, None);
}

#[test]
fn error_uses_custom_status() {
    let outcome = Outcome::error_with_status("Bad request", 400);
    assert_eq!(outcome.status, 400);
    assert_eq!(outcome.error.as_deref(), Some("Bad request"));
}

#[test]
fn not_found_defaults_message_and_status() {
    let outcome = Outcome::not_found();
    assert!(!outcome.success);
    assert_eq!(outcome.status, 404);
    assert_eq!(outcome.error.as_deref(), Some("Resource not found"));
}

#[test]
fn not_found_keeps_custom_message() {
    let outcome = Outcome::not_found_with_message("No user");
    assert_eq!(outcome.status, 404);
    assert_eq!(outcome.error.as_deref(), Some("No user"));
}

#[test]
fn from_error_extracts_validation_details() {
    let err = StoreError::validation("email", "invalid");
    let outcome = Outcome::from_error(&err);
    assert!(!outcome.success);
    assert_eq!(outcome.status, 400);
    assert_eq!(outcome.error.as_deref(), Some("Validation failed"));
    assert_eq!(outcome.data, Some(json!({ "email": "invalid" })));
}

#[test]
fn from_error_keeps_carried_status_code() {
    let err = StoreError::backend_with_status("Oops!", 418);
    let outcome = Outcome::from_error(&err);
    assert!(!outcome.success);
    assert_eq!(outcome.status, 418);
    assert_eq!(outcome.error.as_deref(), Some("Oops!"));
    assert_eq!(outcome.data, None);
}

#[test]
fn from_error_defaults_to_500_without_carried_status() {
    let err = StoreError::backend("Boom!");
    let outcome = Outcome::from_error(&err);
    assert_eq!(outcome.status, 500);
    assert_eq!(outcome.error.as_deref(), Some("Boom!"));
}

#[test]
fn failure_serialization_omits_absent_fields() {
    let outcome = Outcome::error("broken");
    let value = serde_json::to_value(&outcome).expect("serializes");
    let object = value.as_object().expect("object");
    assert!(!object.contains_key("data"));
    assert!(!object.contains_key("metadata"));
    assert_eq!(object["success"], json!(false));
    assert_eq!(object["status"], json!(500));
}
