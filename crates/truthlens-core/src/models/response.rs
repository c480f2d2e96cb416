use serde_json::{Map, Value as JsonValue};

use crate::error::TransportError;

/// Unvalidated JSON object returned by the verification backend.
///
/// The only structural guarantee is that the body is a JSON object; every field
/// inside it may be missing or of an unexpected type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse(Map<String, JsonValue>);

impl RawResponse {
    pub fn from_value(value: JsonValue) -> Result<Self, TransportError> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Err(TransportError::BodyParseError(
                "No response from backend".to_string(),
            )),
            other => Err(TransportError::BodyParseError(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, TransportError> {
        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| TransportError::BodyParseError(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for RawResponse {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_objects() {
        let raw = RawResponse::from_slice(br#"{"fake_percentage": 12.5}"#).unwrap();
        assert_eq!(raw.get("fake_percentage"), Some(&json!(12.5)));
    }

    #[test]
    fn null_fields_read_as_absent() {
        let raw = RawResponse::from_value(json!({ "hate_speech": null })).unwrap();
        assert!(raw.get("hate_speech").is_none());
    }

    #[test]
    fn rejects_non_object_bodies() {
        let err = RawResponse::from_slice(b"[1, 2]").unwrap_err();
        assert!(matches!(err, TransportError::BodyParseError(ref m) if m.contains("array")));

        let err = RawResponse::from_slice(b"null").unwrap_err();
        assert!(matches!(err, TransportError::BodyParseError(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = RawResponse::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, TransportError::BodyParseError(_)));
    }
}
