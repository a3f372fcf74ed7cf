//! Call observation hooks.
//!
//! An observer sees every request, response and error of the call engine.
//! It cannot change control flow.

use serde_json::Value;

use super::rpc::RpcError;
use super::transport::TransportError;

/// Identifies one attempt of a logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEvent<'a> {
    pub method: &'a str,
    /// Request id, shared by every attempt of the call.
    pub id: u64,
    /// Zero-based attempt index.
    pub attempt: usize,
}

/// Receives call lifecycle events. All methods default to no-ops.
pub trait RpcObserver: Send + Sync {
    /// About to send an attempt.
    fn on_request(&self, _event: &CallEvent<'_>, _params: &Value) {}

    /// Attempt produced a decoded result.
    fn on_response(&self, _event: &CallEvent<'_>, _result: &Value) {}

    /// Call failed with a non-retryable error.
    fn on_error(&self, _event: &CallEvent<'_>, _error: &RpcError) {}

    /// Attempt failed at the transport level.
    fn on_network_error(&self, _event: &CallEvent<'_>, _error: &TransportError, _will_retry: bool) {
    }
}

/// Observer that writes call events to `tracing`.
///
/// Params and results are only logged at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RpcObserver for TracingObserver {
    fn on_request(&self, event: &CallEvent<'_>, params: &Value) {
        tracing::debug!(
            method = event.method,
            id = event.id,
            attempt = event.attempt,
            %params,
            "rpc request"
        );
    }

    fn on_response(&self, event: &CallEvent<'_>, result: &Value) {
        tracing::debug!(
            method = event.method,
            id = event.id,
            attempt = event.attempt,
            %result,
            "rpc response"
        );
    }

    fn on_error(&self, event: &CallEvent<'_>, error: &RpcError) {
        tracing::error!(
            method = event.method,
            id = event.id,
            attempt = event.attempt,
            code = ?error.code(),
            %error,
            "rpc error"
        );
    }

    fn on_network_error(&self, event: &CallEvent<'_>, error: &TransportError, will_retry: bool) {
        if will_retry {
            tracing::warn!(
                method = event.method,
                id = event.id,
                attempt = event.attempt,
                %error,
                "rpc network error, retrying"
            );
        } else {
            tracing::error!(
                method = event.method,
                id = event.id,
                attempt = event.attempt,
                %error,
                "rpc network error, giving up"
            );
        }
    }
}
