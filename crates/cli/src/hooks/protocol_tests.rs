// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;

#[test]
fn parses_claude_code_payload() {
    let payload = HookPayload::parse(
        r#"{"hook_event_name":"PreToolUse","session_id":"abc","cwd":"/work",
            "tool_name":"Bash","tool_input":{"command":"ls -la"},"permission_mode":"default"}"#,
    )
    .unwrap();

    assert_eq!(payload.hook_event_name, "PreToolUse");
    assert_eq!(payload.session_id.as_deref(), Some("abc"));
    assert_eq!(payload.tool_name(), "Bash");
    assert_eq!(payload.input_str("command"), Some("ls -la"));
    assert_eq!(payload.extra.get("permission_mode"), Some(&json!("default")));
}

#[test]
fn empty_input_is_default_payload() {
    assert_eq!(HookPayload::parse("").unwrap(), HookPayload::default());
    assert_eq!(HookPayload::parse(" \n").unwrap(), HookPayload::default());
    assert!(HookPayload::parse("{not json").is_err());
}

#[test]
fn serializes_flat_without_empty_fields() {
    let payload = HookPayload::tool("PreToolUse", "Read", json!({"file_path": "a.rs"}));
    let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Read", "tool_input": {"file_path": "a.rs"}})
    );
}

#[test]
fn changed_files_from_every_source() {
    let payload = HookPayload::tool(
        "PostToolUse",
        "MultiEdit",
        json!({
            "file_path": "src/lib.rs",
            "path": "src/",
            "edits": [{"file_path": "src/main.rs"}, {"file_path": "src/lib.rs"}],
            "files": ["README.md", 7]
        }),
    );
    assert_eq!(
        payload.changed_files(),
        vec!["src/lib.rs", "src/", "src/main.rs", "README.md"]
    );
}

#[test]
fn changed_files_empty_without_tool_input() {
    assert!(HookPayload::new("Stop").changed_files().is_empty());
}
