//! Response and error text formatting shared by the builtin tools

use crate::error::ScoutResult;
use serde_json::Value;

/// Re-serialize a JSON body with two-space indentation (pure function)
///
/// A body that is not valid JSON is treated as a JSON string value.
pub fn pretty_json_text(body: &str) -> ScoutResult<String> {
    let value = serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.to_string()));
    Ok(serde_json::to_string_pretty(&value)?)
}

/// `message` field of a JSON error body, if present and non-null (pure function)
pub fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Generic message for a non-2xx status
pub fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

/// Final text of a recovered backend error
pub fn backend_error_text(backend_label: &str, message: &str) -> String {
    format!("{backend_label} API error: {message}")
}
