// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor hook wire format.
//!
//! Cursor writes one JSON request to the hook's stdin and reads exactly one
//! JSON response from its stdout:
//! ```json
//! {"hook_event_name": "beforeShellExecution", "conversation_id": "...", "command": "ls -la", "cwd": "/work"}
//! ```
//! ```json
//! {"permission": "deny", "userMessage": "...", "agentMessage": "..."}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A native Cursor hook request.
///
/// Fields are a union over every native event; each event fills its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorRequest {
    /// Native event discriminator, e.g. `beforeShellExecution`
    pub hook_event_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspace_roots: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Shell command (`beforeShellExecution`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// MCP server name (`beforeMCPExecution`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// MCP tool name (`beforeMCPExecution`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// MCP tool arguments, as an object or a JSON-encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,

    /// File being read or edited (`beforeReadFile`, `afterFileEdit`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Applied edits (`afterFileEdit`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<Value>,

    /// Submitted prompt (`beforeSubmitPrompt`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Agent loop status (`stop`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CursorRequest {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Working directory: `cwd`, else the first workspace root.
    pub fn working_dir(&self) -> Option<&str> {
        self.cwd
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.workspace_roots.first().map(String::as_str))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Allow,
    Deny,
}

/// The single response written back to Cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorResponse {
    pub permission: Permission,

    /// Shown to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,

    /// Fed back to the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_message: Option<String>,

    /// Whether the prompt proceeds (`beforeSubmitPrompt` only)
    #[serde(
        rename = "continue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continue_: Option<bool>,
}

impl CursorResponse {
    pub fn allow() -> Self {
        Self {
            permission: Permission::Allow,
            user_message: None,
            agent_message: None,
            continue_: None,
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            permission: Permission::Deny,
            agent_message: Some(message.clone()),
            user_message: Some(message),
            continue_: None,
        }
    }

    /// Set `continue` from the permission, as `beforeSubmitPrompt` expects.
    pub fn with_continue(mut self) -> Self {
        self.continue_ = Some(self.permission == Permission::Allow);
        self
    }

    pub fn is_allowed(&self) -> bool {
        self.permission == Permission::Allow
    }

    pub fn to_json(&self) -> String {
        // Plain strings and bools never fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"permission":"deny","userMessage":"failed to encode hook response"}"#.to_string()
        })
    }
}

/// Process exit code reported to Cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeExit {
    Allow = 0,
    Deny = 2,
    MalformedInput = 3,
}

impl BridgeExit {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
