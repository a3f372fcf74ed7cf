//! Result decoding.
//!
//! A decoder turns the raw `result` of a success envelope into a typed value
//! or rejects it. serde handles shape; [`Validate`] adds the range checks the
//! service contract promises (scores in [0, 1], 1-based line numbers, ...).

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decoding errors.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("result does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl DecodeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Semantic checks run after a successful serde decode.
pub trait Validate {
    fn validate(&self) -> Result<(), DecodeError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), DecodeError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

/// Decode and validate a typed result.
pub fn decode<T>(raw: &Value) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Validate,
{
    let value = T::deserialize(raw)?;
    value.validate()?;
    Ok(value)
}

/// Pass-through decoder for untyped calls.
pub fn decode_value(raw: &Value) -> Result<Value, DecodeError> {
    Ok(raw.clone())
}

/// Reject negative or non-finite numbers.
pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<(), DecodeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DecodeError::invalid(field, format!("{} is not a non-negative number", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Timing {
        execution_time_ms: f64,
    }

    impl Validate for Timing {
        fn validate(&self) -> Result<(), DecodeError> {
            check_non_negative("execution_time_ms", self.execution_time_ms)
        }
    }

    #[test]
    fn test_decode_ok() {
        let t: Timing = decode(&json!({"execution_time_ms": 4.5})).unwrap();
        assert_eq!(t.execution_time_ms, 4.5);
    }

    #[test]
    fn test_decode_shape_error() {
        let err = decode::<Timing>(&json!({"execution_time_ms": "fast"})).unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }

    #[test]
    fn test_decode_validation_error() {
        let err = decode::<Timing>(&json!({"execution_time_ms": -1})).unwrap_err();
        assert!(err.to_string().contains("execution_time_ms"));
    }

    #[test]
    fn test_vec_validation() {
        let items: Result<Vec<Timing>, _> =
            decode(&json!([{"execution_time_ms": 1}, {"execution_time_ms": -2}]));
        assert!(items.is_err());
    }

    #[test]
    fn test_decode_value_passes_through() {
        let raw = json!({"anything": [1, 2, 3]});
        assert_eq!(decode_value(&raw).unwrap(), raw);
    }
}
