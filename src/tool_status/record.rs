use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One finished tool invocation, as produced by the tool dispatch layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolExecutionRecord {
    #[serde(default, alias = "tool_name")]
    pub tool_name: String,
    #[serde(default, alias = "tool_input", deserialize_with = "lenient_map")]
    pub tool_input: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub result: Map<String, Value>,
}

/// Anything that is not a JSON object becomes an empty map.
fn lenient_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(into_map(Value::deserialize(deserializer)?))
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl ToolExecutionRecord {
    pub fn new(tool_name: impl Into<String>, tool_input: Value, result: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input: into_map(tool_input),
            result: into_map(result),
        }
    }

    pub fn input_str(&self, key: &str) -> &str {
        self.tool_input
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn result_str(&self, key: &str) -> &str {
        self.result.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// A count from `result[key]`, or the length of `result[array_key]`, or 0.
    pub fn result_count(&self, key: &str, array_key: &str) -> u64 {
        self.result
            .get(key)
            .and_then(Value::as_u64)
            .or_else(|| {
                self.result
                    .get(array_key)
                    .and_then(Value::as_array)
                    .map(|items| items.len() as u64)
            })
            .unwrap_or(0)
    }

    /// Error text carried by the result, if the call failed.
    pub fn error_text(&self) -> Option<String> {
        match self.result.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Object(details) => Some(
                details
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Value::Object(details.clone()).to_string()),
            ),
            other => Some(other.to_string()),
        }
    }
}
