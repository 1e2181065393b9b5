//! Result envelopes for MCP tool calls
//!
//! Success payloads are pretty-printed `{success: true, <key>: payload}`.
//! Plain acknowledgements and failures are compact single-line JSON.

use crate::error::LinearKanbanError;
use rmcp::model::*;
use serde_json::{json, Map, Value};

fn text_result(text: String, is_error: bool) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text }),
            None,
        )],
        is_error: Some(is_error),
    }
}

/// `{success: true, <key>: payload}`, pretty-printed
pub fn create_success_response(key: &str, payload: Value) -> CallToolResult {
    let mut envelope = Map::new();
    envelope.insert("success".to_string(), Value::Bool(true));
    envelope.insert(key.to_string(), payload);
    let text = serde_json::to_string_pretty(&Value::Object(envelope))
        .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":\"{e}\"}}"));
    text_result(text, false)
}

/// `{success: true, message}`
pub fn create_message_response(message: impl Into<String>) -> CallToolResult {
    let envelope = json!({ "success": true, "message": message.into() });
    text_result(envelope.to_string(), false)
}

/// `{success: false, error}`, plus `availableStates` when a state name did
/// not match
pub fn create_error_response(error: &LinearKanbanError) -> CallToolResult {
    let envelope = match error {
        LinearKanbanError::StateNotFound {
            available_states, ..
        } => json!({
            "success": false,
            "error": error.to_string(),
            "availableStates": available_states,
        }),
        _ => json!({ "success": false, "error": error.to_string() }),
    };
    text_result(envelope.to_string(), true)
}

/// The text of the first content block of a tool result
pub fn response_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}
