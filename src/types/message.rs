//! Tool call requests and the result messages produced for them.

use serde::{Deserialize, Serialize};

use super::agent::Agent;

/// Free-form metadata attached to a [`ToolMessage`].
pub type ToolMetadata = serde_json::Map<String, serde_json::Value>;

/// Metadata key set on every failed dispatch.
pub const IS_FAILED: &str = "is_failed";

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ToolCall {
    /// Create a call with no arguments and no id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: serde_json::Map::new(),
            id: None,
        }
    }

    /// Builder: add one keyword argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Builder: replace all arguments.
    pub fn with_args(mut self, args: serde_json::Map<String, serde_json::Value>) -> Self {
        self.args = args;
        self
    }

    /// Builder: set the call id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Result of dispatching a single [`ToolCall`].
///
/// Success and failure share this shape; callers branch on
/// [`ToolMessage::is_failed`], not on the content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    pub tool_call: ToolCall,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<serde_json::Value>,
    #[serde(default)]
    pub tool_metadata: ToolMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
}

impl ToolMessage {
    /// Create a success message carrying the raw return value.
    pub fn success(call: &ToolCall, result: serde_json::Value, agent: Option<&Agent>) -> Self {
        Self {
            content: render_content(&result),
            tool_call_id: call.id.clone(),
            tool_call: call.clone(),
            tool_result: Some(result),
            tool_metadata: ToolMetadata::new(),
            agent: agent.cloned(),
        }
    }

    /// Create a failure message with `is_failed` set.
    pub fn failure(call: &ToolCall, content: impl Into<String>, agent: Option<&Agent>) -> Self {
        let mut tool_metadata = ToolMetadata::new();
        tool_metadata.insert(IS_FAILED.to_string(), serde_json::Value::Bool(true));
        Self {
            content: content.into(),
            tool_call_id: call.id.clone(),
            tool_call: call.clone(),
            tool_result: None,
            tool_metadata,
            agent: agent.cloned(),
        }
    }

    /// Whether the dispatch that produced this message failed.
    pub fn is_failed(&self) -> bool {
        self.tool_metadata
            .get(IS_FAILED)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// Human-readable rendering of a raw return value.
///
/// Strings are rendered verbatim, everything else as compact JSON.
pub fn render_content(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
