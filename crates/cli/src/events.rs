// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical lifecycle event vocabulary.
//!
//! Claude Code event names are the canonical vocabulary. Cursor's hook events
//! resolve to them through [`canonicalize`], so configuration can be written
//! once in either dialect.

pub const PRE_TOOL_USE: &str = "PreToolUse";
pub const POST_TOOL_USE: &str = "PostToolUse";
pub const USER_PROMPT_SUBMIT: &str = "UserPromptSubmit";
pub const NOTIFICATION: &str = "Notification";
pub const STOP: &str = "Stop";
pub const SUBAGENT_STOP: &str = "SubagentStop";
pub const PRE_COMPACT: &str = "PreCompact";
pub const SESSION_START: &str = "SessionStart";
pub const SESSION_END: &str = "SessionEnd";
pub const PERMISSION_REQUEST: &str = "PermissionRequest";

/// Cursor native event names.
pub mod cursor {
    pub const BEFORE_SHELL_EXECUTION: &str = "beforeShellExecution";
    pub const BEFORE_MCP_EXECUTION: &str = "beforeMCPExecution";
    pub const BEFORE_READ_FILE: &str = "beforeReadFile";
    pub const AFTER_FILE_EDIT: &str = "afterFileEdit";
    pub const BEFORE_SUBMIT_PROMPT: &str = "beforeSubmitPrompt";
    pub const STOP: &str = "stop";
}

/// One row of the canonical event table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventInfo {
    /// Canonical event name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether installed hooks can be registered for this event.
    pub supported: bool,
    /// Whether the event carries a tool name that matchers apply to.
    pub tool_event: bool,
}

/// The authoritative event table.
pub const EVENTS: &[EventInfo] = &[
    EventInfo {
        name: PRE_TOOL_USE,
        description: "Before a tool runs",
        supported: true,
        tool_event: true,
    },
    EventInfo {
        name: POST_TOOL_USE,
        description: "After a tool completes",
        supported: true,
        tool_event: true,
    },
    EventInfo {
        name: USER_PROMPT_SUBMIT,
        description: "After a prompt is submitted, before it is processed",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: NOTIFICATION,
        description: "When the agent sends a notification",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: STOP,
        description: "When the agent finishes responding",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: SUBAGENT_STOP,
        description: "When a subagent finishes responding",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: PRE_COMPACT,
        description: "Before context compaction",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: SESSION_START,
        description: "When a session starts or resumes",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: SESSION_END,
        description: "When a session ends",
        supported: true,
        tool_event: false,
    },
    EventInfo {
        name: PERMISSION_REQUEST,
        description: "When a permission dialog is shown",
        supported: false,
        tool_event: true,
    },
];

/// Cursor native event name to canonical event name.
const CURSOR_ALIASES: &[(&str, &str)] = &[
    (cursor::BEFORE_SHELL_EXECUTION, PRE_TOOL_USE),
    (cursor::BEFORE_MCP_EXECUTION, PRE_TOOL_USE),
    (cursor::BEFORE_READ_FILE, PRE_TOOL_USE),
    (cursor::AFTER_FILE_EDIT, POST_TOOL_USE),
    (cursor::BEFORE_SUBMIT_PROMPT, USER_PROMPT_SUBMIT),
    (cursor::STOP, STOP),
];

/// Resolve an event name to its canonical spelling.
///
/// Accepts canonical names, Cursor aliases, and case/separator variants
/// (`pre_tool_use`, `pre-tool-use`). Unrecognized names are returned unchanged
/// so validation can reject them precisely.
pub fn canonicalize(name: &str) -> &str {
    if let Some(info) = EVENTS.iter().find(|e| e.name == name) {
        return info.name;
    }
    if let Some((_, canonical)) = CURSOR_ALIASES.iter().find(|(alias, _)| *alias == name) {
        return *canonical;
    }

    let folded = fold(name);
    if folded.is_empty() {
        return name;
    }
    if let Some(info) = EVENTS.iter().find(|e| fold(e.name) == folded) {
        return info.name;
    }
    CURSOR_ALIASES
        .iter()
        .find(|(alias, _)| fold(alias) == folded)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Look up the table row for an event (after canonicalization).
pub fn lookup(name: &str) -> Option<&'static EventInfo> {
    let canonical = canonicalize(name);
    EVENTS.iter().find(|e| e.name == canonical)
}

/// Whether `name` resolves to a supported canonical event.
pub fn is_valid_event(name: &str) -> bool {
    lookup(name).is_some_and(|e| e.supported)
}

/// Canonical names of all supported events, in table order.
pub fn valid_event_names() -> Vec<&'static str> {
    EVENTS
        .iter()
        .filter(|e| e.supported)
        .map(|e| e.name)
        .collect()
}

/// Description of an event, resolving aliases.
pub fn describe(name: &str) -> Option<&'static str> {
    lookup(name).map(|e| e.description)
}

/// Cursor native events that deliver the given canonical event.
pub fn cursor_events_for(canonical: &str) -> Vec<&'static str> {
    CURSOR_ALIASES
        .iter()
        .filter(|(_, c)| *c == canonical)
        .map(|(alias, _)| *alias)
        .collect()
}

/// Whether `name` is one of Cursor's native event names.
pub fn is_cursor_event(name: &str) -> bool {
    CURSOR_ALIASES.iter().any(|(alias, _)| *alias == name)
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' ' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
