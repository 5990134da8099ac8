//! WASM-target tests for prd-types.
//!
//! Runs the clock- and uuid-dependent pieces under wasm32-unknown-unknown
//! via `wasm-pack test --node`, where `Utc::now` and `Uuid::new_v4` go
//! through the JS bindings.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use prd_types::config::ClientConfig;
use prd_types::error::{ApiError, ChatError};
use prd_types::message::*;
use prd_types::project::*;

#[wasm_bindgen_test]
fn message_ids_are_unique() {
    let a = generate_message_id();
    let b = generate_message_id();
    assert!(a.starts_with("msg-"));
    assert_ne!(a, b);
}

#[wasm_bindgen_test]
fn placeholder_has_timestamp() {
    let msg = NewMessage::placeholder().into_message(generate_message_id());
    assert!(msg.timestamp.timestamp() > 0);
    assert!(msg.content.is_empty());
}

#[wasm_bindgen_test]
fn bad_project_date_falls_back_to_now() {
    let json = r#"{"id":"p","name":"n","created_at":"??"}"#;
    let project = serde_json::from_str::<ProjectRecord>(json).unwrap().into_project();
    assert!(project.created_at.timestamp() > 0);
}

#[wasm_bindgen_test]
fn default_endpoint() {
    let config = ClientConfig::default();
    assert_eq!(config.api.endpoint("/chat/stream"), "http://localhost:8000/api/chat/stream");
}

#[wasm_bindgen_test]
fn network_error_has_status_zero() {
    let record = ApiError::from(ChatError::Network("offline".to_string()));
    assert_eq!(record.status, Some(0));
}
