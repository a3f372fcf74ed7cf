//! Error codes and the error object carried by failure envelopes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Error codes returned in JSON-RPC failure envelopes.
///
/// The -32700..-32600 block is reserved by JSON-RPC itself; the -32000 block
/// holds codes specific to the index service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The service could not parse the request body.
    ParseError,
    /// The request was not a valid JSON-RPC request.
    InvalidRequest,
    /// Unknown method.
    MethodNotFound,
    /// Parameters failed validation on the service side.
    InvalidParams,
    /// Unhandled service failure.
    InternalError,
    /// No index has been built or loaded yet.
    IndexNotFound,
    /// The requested entity id is not in the index.
    EntityNotFound,
    /// A source file could not be parsed while indexing.
    ParseFailure,
    /// The query exceeded the service-side time budget.
    QueryTimeout,
}

impl ErrorCode {
    /// All codes known to this client.
    pub const ALL: [ErrorCode; 9] = [
        ErrorCode::ParseError,
        ErrorCode::InvalidRequest,
        ErrorCode::MethodNotFound,
        ErrorCode::InvalidParams,
        ErrorCode::InternalError,
        ErrorCode::IndexNotFound,
        ErrorCode::EntityNotFound,
        ErrorCode::ParseFailure,
        ErrorCode::QueryTimeout,
    ];

    /// Numeric wire value.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::IndexNotFound => -32001,
            Self::EntityNotFound => -32002,
            Self::ParseFailure => -32003,
            Self::QueryTimeout => -32004,
        }
    }

    /// Look up a code by its wire value. Unknown values return `None`.
    pub fn from_i64(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_i64() == code)
    }

    /// Stable short name, used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MethodNotFound => "METHOD_NOT_FOUND",
            Self::InvalidParams => "INVALID_PARAMS",
            Self::InternalError => "INTERNAL_ERROR",
            Self::IndexNotFound => "INDEX_NOT_FOUND",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::ParseFailure => "PARSE_FAILURE",
            Self::QueryTimeout => "QUERY_TIMEOUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.as_i64())
    }
}

/// Error object from a failure envelope.
///
/// Produced by the service; the client maps it once into a typed error and
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code. Unknown codes are kept as-is.
    #[serde(deserialize_with = "integral_code")]
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional machine-readable details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorObject {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The known code for this object, if any.
    pub fn known_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i64(self.code)
    }
}

/// Accept integral floats (`-32001.0`) as well as integers.
fn integral_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(code) = number.as_i64() {
        return Ok(code);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(D::Error::custom(format!(
            "error code {} is not an integer",
            number
        ))),
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::ParseError.as_i64(), -32700);
        assert_eq!(ErrorCode::InvalidParams.as_i64(), -32602);
        assert_eq!(ErrorCode::IndexNotFound.as_i64(), -32001);
        assert_eq!(ErrorCode::QueryTimeout.as_i64(), -32004);
    }

    #[test]
    fn test_from_i64() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_i64(code.as_i64()), Some(code));
        }
        assert_eq!(ErrorCode::from_i64(-32099), None);
        assert_eq!(ErrorCode::from_i64(0), None);
    }

    #[test]
    fn test_error_object_parsing() {
        let json = r#"{"code": -32002, "message": "Entity not found", "data": {"entity_id": "x"}}"#;
        let obj: ErrorObject = serde_json::from_str(json).unwrap();

        assert_eq!(obj.known_code(), Some(ErrorCode::EntityNotFound));
        assert_eq!(obj.message, "Entity not found");
        assert_eq!(obj.data.unwrap()["entity_id"], "x");
    }

    #[test]
    fn test_error_object_integral_float_code() {
        let obj: ErrorObject =
            serde_json::from_str(r#"{"code": -32001.0, "message": "Index not found"}"#).unwrap();
        assert_eq!(obj.code, -32001);
        assert_eq!(obj.known_code(), Some(ErrorCode::IndexNotFound));

        let res = serde_json::from_str::<ErrorObject>(r#"{"code": -32001.5, "message": "x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_error_object_without_data() {
        let obj: ErrorObject =
            serde_json::from_str(r#"{"code": -32004, "message": "Query timeout"}"#).unwrap();
        assert!(obj.data.is_none());

        let out = serde_json::to_value(&obj).unwrap();
        assert!(out.get("data").is_none());
    }
}
