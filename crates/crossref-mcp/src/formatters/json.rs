//! JSON output formatting for tool results.

use serde_json::{Value, json};

use crate::error::ToolResult;
use crate::models::Envelope;

/// Pretty-printed envelope, as carried in the text content block.
pub fn envelope_text(envelope: &Envelope) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// MCP `tools/call` result for an envelope.
///
/// The envelope travels twice: as serialized text for clients that only
/// read `content`, and as `structuredContent`.
pub fn tool_result(envelope: &Envelope) -> ToolResult<Value> {
    let structured = serde_json::to_value(envelope)?;
    let text = envelope_text(envelope)?;

    Ok(json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "structuredContent": structured
    }))
}
