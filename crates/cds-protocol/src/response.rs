//! JSON-RPC response envelopes.
//!
//! A response is either a success envelope carrying `result` or a failure
//! envelope carrying `error`. The client tries the failure shape first.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ErrorObject;
use crate::request::JsonRpcVersion;

/// Id echoed back by the service.
///
/// The protocol allows numbers, strings and null; only a number equal to the
/// request id counts as a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseId {
    Number(serde_json::Number),
    String(String),
    Null,
}

impl ResponseId {
    /// True when this id is the integer `request_id`.
    ///
    /// A string with the same digits or a null id never matches.
    pub fn matches(&self, request_id: u64) -> bool {
        match self {
            ResponseId::Number(n) => n.as_u64() == Some(request_id),
            ResponseId::String(_) | ResponseId::Null => false,
        }
    }
}

impl From<u64> for ResponseId {
    fn from(id: u64) -> Self {
        ResponseId::Number(id.into())
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseId::Number(n) => write!(f, "{}", n),
            ResponseId::String(s) => write!(f, "{:?}", s),
            ResponseId::Null => write!(f, "null"),
        }
    }
}

/// Success envelope. `result` is kept raw and decoded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub jsonrpc: JsonRpcVersion,
    pub id: ResponseId,
    pub result: Value,
}

impl SuccessEnvelope {
    pub fn new(id: impl Into<ResponseId>, result: Value) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id: id.into(),
            result,
        }
    }
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub jsonrpc: JsonRpcVersion,
    pub id: ResponseId,
    pub error: ErrorObject,
}

impl FailureEnvelope {
    pub fn new(id: impl Into<ResponseId>, error: ErrorObject) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id: id.into(),
            error,
        }
    }
}
