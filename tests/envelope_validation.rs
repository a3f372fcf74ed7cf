//! Response Envelope Validation Tests
//!
//! Anything that is not a well-formed envelope for the request just sent is
//! reported as an unexpected response.

mod fixtures;

use cds_client::{RpcError, SearchEntitiesParams};
use fixtures::*;
use serde_json::{json, Value};

fn expect_unexpected(reply: Value) -> String {
    let (client, mock) = client_with_delays(&[0, 0]);
    mock.push_json(reply);

    let err = client
        .search_entities(&SearchEntitiesParams::new("sanitize"))
        .unwrap_err();
    assert_eq!(mock.attempts(), 1, "envelope errors must not be retried");

    match err {
        RpcError::UnexpectedResponse(message) => message,
        other => panic!("expected UnexpectedResponse, got {other:?}"),
    }
}

// =============================================================================
// Id correlation
// =============================================================================

#[test]
fn test_mismatched_id() {
    let message = expect_unexpected(success(json!(99), empty_search_result()));
    assert_eq!(
        message,
        "JSON-RPC response id mismatch: expected 1, received 99"
    );
}

#[test]
fn test_null_id_is_a_mismatch() {
    let message = expect_unexpected(success(Value::Null, empty_search_result()));
    assert!(message.contains("id mismatch"));
    assert!(message.contains("null"));
}

#[test]
fn test_string_id_is_a_mismatch() {
    let message = expect_unexpected(success(json!("1"), empty_search_result()));
    assert!(message.contains("id mismatch"));
}

#[test]
fn test_failure_envelope_with_wrong_id() {
    let message = expect_unexpected(failure(json!(7), -32001, "Index not found"));
    assert!(message.contains("expected 1, received 7"));
}

#[test]
fn test_failure_envelope_with_null_id() {
    let message = expect_unexpected(failure(Value::Null, -32001, "Index not found"));
    assert_eq!(
        message,
        "JSON-RPC response id mismatch: expected 1, received null"
    );
}

#[test]
fn test_id_checked_before_result_shape() {
    // Wrong id and a bogus result: the id mismatch wins
    let message = expect_unexpected(success(json!(5), json!({"bogus": true})));
    assert!(message.contains("id mismatch"));
}

// =============================================================================
// Envelope shape
// =============================================================================

#[test]
fn test_wrong_protocol_version() {
    let message = expect_unexpected(json!({
        "jsonrpc": "1.0",
        "id": 1,
        "result": empty_search_result()
    }));
    assert!(message.starts_with("JSON-RPC response validation failed"));
}

#[test]
fn test_missing_result() {
    let message = expect_unexpected(json!({"jsonrpc": "2.0", "id": 1}));
    assert!(message.starts_with("JSON-RPC response validation failed"));
}

#[test]
fn test_non_object_payload() {
    expect_unexpected(json!([1, 2, 3]));
}

#[test]
fn test_error_without_message_is_not_a_failure_envelope() {
    let message = expect_unexpected(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": -32001}
    }));
    assert!(message.starts_with("JSON-RPC response validation failed"));
}

// =============================================================================
// Result schema
// =============================================================================

#[test]
fn test_result_missing_required_field() {
    let message = expect_unexpected(success(
        json!(1),
        json!({"entities": [], "total_count": 0}),
    ));
    assert!(message.starts_with("JSON-RPC response validation failed"));
}

#[test]
fn test_result_with_unknown_entity_type() {
    let mut entity = sanitize_entity();
    entity["entity_type"] = json!("module");
    expect_unexpected(success(json!(1), search_result(vec![entity])));
}

#[test]
fn test_result_with_zero_line() {
    let mut entity = sanitize_entity();
    entity["line_range"] = json!([0, 4]);
    expect_unexpected(success(json!(1), search_result(vec![entity])));
}

#[test]
fn test_extra_fields_are_tolerated() {
    let (client, mock) = client();
    let mut result = empty_search_result();
    result["server_version"] = json!("1.2.3");
    mock.push_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
        "trace": "abc"
    }));

    let result = client
        .search_entities(&SearchEntitiesParams::new("sanitize"))
        .unwrap();
    assert_eq!(result.total_count, 0);
}

#[test]
fn test_float_counter_is_rejected() {
    let mut result = empty_search_result();
    result["total_count"] = json!(0.0);
    let message = expect_unexpected(success(json!(1), result));
    assert!(message.starts_with("JSON-RPC response validation failed"));
}
