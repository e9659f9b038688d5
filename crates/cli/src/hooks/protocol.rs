// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical hook payload.
//!
//! Claude Code writes flat JSON to a hook's stdin with `hook_event_name` at
//! the top level:
//! ```json
//! {"hook_event_name": "PreToolUse", "session_id": "...", "cwd": "/work", "tool_name": "Bash", "tool_input": {"command": "ls"}}
//! ```
//! The Cursor bridge translates native payloads into the same shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event payload in the canonical (Claude Code) shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HookPayload {
    /// Canonical event name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hook_event_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Tool being invoked (tool events only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Tool arguments (tool events only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,

    /// Tool result (`PostToolUse` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_response: Option<Value>,

    /// Submitted prompt (`UserPromptSubmit` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Fields this tool does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HookPayload {
    /// Create a payload for an event.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            hook_event_name: event.into(),
            ..Self::default()
        }
    }

    /// Create a tool event payload.
    pub fn tool(event: impl Into<String>, tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            tool_input: Some(tool_input),
            ..Self::new(event)
        }
    }

    /// Parse a payload; empty input yields the default payload.
    pub fn parse(input: &str) -> Result<Self, serde_json::Error> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(input)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or_default()
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or_default()
    }

    /// A string field of `tool_input`.
    pub fn input_str(&self, field: &str) -> Option<&str> {
        self.tool_input.as_ref()?.get(field)?.as_str()
    }

    /// Files the tool call touches, in order and without duplicates.
    ///
    /// Collected from `tool_input.file_path`, `tool_input.path`,
    /// `tool_input.edits[].file_path`, and `tool_input.files[]`.
    pub fn changed_files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        let Some(input) = self.tool_input.as_ref() else {
            return files;
        };

        let mut push = |value: Option<&Value>| {
            if let Some(path) = value.and_then(Value::as_str) {
                if !path.is_empty() && !files.iter().any(|f| f == path) {
                    files.push(path.to_string());
                }
            }
        };

        push(input.get("file_path"));
        push(input.get("path"));
        if let Some(edits) = input.get("edits").and_then(Value::as_array) {
            for edit in edits {
                push(edit.get("file_path"));
            }
        }
        if let Some(list) = input.get("files").and_then(Value::as_array) {
            for item in list {
                push(Some(item));
            }
        }
        files
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
