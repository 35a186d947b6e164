//! Raw pipeline input
//!
//! Price lists and notification logs reach the pipeline either as JSON text
//! (e.g. read from a file) or as an already parsed [`serde_json::Value`].

use serde_json::Value;

/// Raw input handed to the pipeline by the host
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// JSON-encoded text, parsed lazily by the consumer
    Json(String),
    /// Already structured data
    Structured(Value),
}

impl RawInput {
    /// Resolve to a JSON value, mapping parse failures through `on_error`
    ///
    /// The parser message is passed to `on_error` so each consumer can word
    /// the failure for its own input.
    pub(crate) fn into_value<E>(self, on_error: impl FnOnce(String) -> E) -> Result<Value, E> {
        match self {
            Self::Json(text) => serde_json::from_str(&text).map_err(|e| on_error(e.to_string())),
            Self::Structured(value) => Ok(value),
        }
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::Json(text.to_string())
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        Self::Json(text)
    }
}

impl From<&String> for RawInput {
    fn from(text: &String) -> Self {
        Self::Json(text.clone())
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<Vec<Value>> for RawInput {
    fn from(values: Vec<Value>) -> Self {
        Self::Structured(Value::Array(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_text_is_parsed() {
        let input = RawInput::from("[1, 2]");
        let value = input.into_value(|e| e).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_structured_value_passes_through() {
        let input = RawInput::from(json!({"a": 1}));
        let value = input.into_value(|e| e).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_error_is_mapped() {
        let input = RawInput::from("not json");
        let err = input
            .into_value(|e| format!("wrapped: {}", e))
            .unwrap_err();
        assert!(err.starts_with("wrapped: "));
    }
}
