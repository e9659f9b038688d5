// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Native Cursor requests to canonical payloads.
//!
//! | Cursor event           | Event              | Tool                        | `tool_input`          |
//! |------------------------|--------------------|-----------------------------|-----------------------|
//! | `beforeShellExecution` | `PreToolUse`       | `Bash`                      | `{command, cwd}`      |
//! | `beforeMCPExecution`   | `PreToolUse`       | `mcp__<server>__<tool>`     | parsed `tool_input`   |
//! | `beforeReadFile`       | `PreToolUse`       | `Read`                      | `{file_path}`         |
//! | `afterFileEdit`        | `PostToolUse`      | `Edit`                      | `{file_path, edits}`  |
//! | `beforeSubmitPrompt`   | `UserPromptSubmit` |                             |                       |
//! | `stop`                 | `Stop`             |                             |                       |

use serde_json::{Map, Value};

use super::protocol::CursorRequest;
use super::BridgeError;
use crate::events::{self, cursor};
use crate::hooks::HookPayload;

pub const BASH_TOOL: &str = "Bash";
pub const READ_TOOL: &str = "Read";
pub const EDIT_TOOL: &str = "Edit";

/// Translate a native request into the canonical payload.
pub fn translate(req: &CursorRequest) -> Result<HookPayload, BridgeError> {
    let native = req.hook_event_name.as_str();
    let mut payload = match native {
        cursor::BEFORE_SHELL_EXECUTION => {
            let command = required(native, "command", req.command.as_deref())?;
            let mut input = Map::new();
            input.insert("command".into(), Value::String(command.to_string()));
            if let Some(cwd) = req.working_dir() {
                input.insert("cwd".into(), Value::String(cwd.to_string()));
            }
            HookPayload::tool(events::PRE_TOOL_USE, BASH_TOOL, Value::Object(input))
        }
        cursor::BEFORE_MCP_EXECUTION => {
            let tool = required(native, "tool_name", req.tool_name.as_deref())?;
            let name = match req.server.as_deref().filter(|s| !s.is_empty()) {
                Some(server) => format!("mcp__{server}__{tool}"),
                None => tool.to_string(),
            };
            HookPayload::tool(events::PRE_TOOL_USE, name, mcp_input(req.tool_input.as_ref())?)
        }
        cursor::BEFORE_READ_FILE => {
            let file = required(native, "file_path", req.file_path.as_deref())?;
            let mut input = Map::new();
            input.insert("file_path".into(), Value::String(file.to_string()));
            HookPayload::tool(events::PRE_TOOL_USE, READ_TOOL, Value::Object(input))
        }
        cursor::AFTER_FILE_EDIT => {
            let file = required(native, "file_path", req.file_path.as_deref())?;
            let mut input = Map::new();
            input.insert("file_path".into(), Value::String(file.to_string()));
            input.insert("edits".into(), Value::Array(req.edits.clone()));
            HookPayload::tool(events::POST_TOOL_USE, EDIT_TOOL, Value::Object(input))
        }
        cursor::BEFORE_SUBMIT_PROMPT => HookPayload {
            prompt: Some(req.prompt.clone().unwrap_or_default()),
            ..HookPayload::new(events::USER_PROMPT_SUBMIT)
        },
        cursor::STOP => {
            let mut payload = HookPayload::new(events::STOP);
            if let Some(status) = &req.status {
                payload.extra.insert("status".into(), Value::String(status.clone()));
            }
            payload
        }
        other => return Err(BridgeError::UnsupportedEvent(other.to_string())),
    };

    payload.session_id = req.conversation_id.clone();
    payload.cwd = req.working_dir().map(str::to_string);
    tracing::debug!(native, event = %payload.hook_event_name, tool = payload.tool_name(), "translated cursor request");
    Ok(payload)
}

fn required<'a>(event: &str, field: &'static str, value: Option<&'a str>) -> Result<&'a str, BridgeError> {
    value.ok_or_else(|| BridgeError::MissingField {
        event: event.to_string(),
        field,
    })
}

/// MCP arguments arrive either as an object or as JSON-encoded text.
fn mcp_input(raw: Option<&Value>) -> Result<Value, BridgeError> {
    match raw {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(Value::Object(Map::new())),
        Some(Value::String(text)) => {
            serde_json::from_str(text).map_err(|e| BridgeError::InvalidToolInput(e.to_string()))
        }
        Some(value) => Ok(value.clone()),
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
