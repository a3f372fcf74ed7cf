//! Shared fixtures for client integration tests
//!
//! Builders for service responses and a recording observer.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cds_client::client::{CallEvent, RpcObserver, TransportError};
use cds_client::{MockExchange, RpcClient, RpcClientConfig, RpcError};
use serde_json::{json, Value};

pub const ENDPOINT: &str = "http://localhost:9876/rpc";

/// Client over a fresh mock exchange with the given retry schedule (ms).
pub fn client_with_delays(delays_ms: &[u64]) -> (RpcClient, Arc<MockExchange>) {
    let mock = Arc::new(MockExchange::new());
    let config = RpcClientConfig {
        retry_delays: delays_ms.iter().map(|ms| Duration::from_millis(*ms)).collect(),
        ..Default::default()
    };
    let client = RpcClient::with_config(ENDPOINT, mock.clone(), config);
    (client, mock)
}

/// Client with no retries.
pub fn client() -> (RpcClient, Arc<MockExchange>) {
    client_with_delays(&[])
}

pub fn success(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

pub fn failure(id: Value, code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}

pub fn sanitize_entity() -> Value {
    json!({
        "id": "e1",
        "name": "sanitize",
        "entity_type": "function",
        "file_path": "src/app.py",
        "line_range": [10, 42],
        "score": 0.9,
        "snippet": {"fold": "def sanitize"}
    })
}

pub fn search_result(entities: Vec<Value>) -> Value {
    let count = entities.len();
    json!({
        "entities": entities,
        "total_count": count,
        "query_metadata": {
            "used_upper_index": true,
            "used_bm25": false,
            "execution_time_ms": 10
        }
    })
}

pub fn empty_search_result() -> Value {
    search_result(vec![])
}

pub fn rebuild_result() -> Value {
    json!({
        "success": true,
        "stats": {
            "files_indexed": 1,
            "entities_found": {"directories": 0, "files": 1, "classes": 0, "functions": 1},
            "edges_created": {"contain": 0, "import": 0, "invoke": 0, "inherit": 0},
            "build_time_ms": 123
        }
    })
}

pub fn entity_details(id: &str) -> Value {
    json!({
        "id": id,
        "name": "sanitize",
        "entity_type": "function",
        "file_path": "src/app.py",
        "line_range": [10, 42],
        "code": "def sanitize(value):\n    return value.strip()",
        "context_before": "import re"
    })
}

pub fn refused() -> TransportError {
    TransportError::connection(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

/// Observer event, flattened for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Request { id: u64, attempt: usize },
    Response { id: u64, attempt: usize },
    Error { id: u64, attempt: usize },
    NetworkError { id: u64, attempt: usize, will_retry: bool },
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Recorded) {
        self.events.lock().unwrap().push(event);
    }
}

impl RpcObserver for RecordingObserver {
    fn on_request(&self, event: &CallEvent<'_>, _params: &Value) {
        self.push(Recorded::Request {
            id: event.id,
            attempt: event.attempt,
        });
    }

    fn on_response(&self, event: &CallEvent<'_>, _result: &Value) {
        self.push(Recorded::Response {
            id: event.id,
            attempt: event.attempt,
        });
    }

    fn on_error(&self, event: &CallEvent<'_>, _error: &RpcError) {
        self.push(Recorded::Error {
            id: event.id,
            attempt: event.attempt,
        });
    }

    fn on_network_error(&self, event: &CallEvent<'_>, _error: &TransportError, will_retry: bool) {
        self.push(Recorded::NetworkError {
            id: event.id,
            attempt: event.attempt,
            will_retry,
        });
    }
}
