// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;

#[test]
fn parses_shell_request() {
    let req = CursorRequest::parse(
        r#"{"hook_event_name":"beforeShellExecution","conversation_id":"c1","generation_id":"g1","command":"ls -la","cwd":"/work","workspace_roots":["/repo"],"hook_version":"1"}"#,
    )
    .unwrap();

    assert_eq!(req.hook_event_name, "beforeShellExecution");
    assert_eq!(req.command.as_deref(), Some("ls -la"));
    assert_eq!(req.working_dir(), Some("/work"));
    assert_eq!(req.extra["hook_version"], "1");
}

#[test]
fn working_dir_falls_back_to_first_root() {
    let req = CursorRequest {
        workspace_roots: vec!["/a".into(), "/b".into()],
        cwd: Some(String::new()),
        ..CursorRequest::default()
    };
    assert_eq!(req.working_dir(), Some("/a"));
    assert_eq!(CursorRequest::default().working_dir(), None);
}

#[test]
fn missing_discriminator_is_malformed() {
    assert!(CursorRequest::parse(r#"{"command":"ls"}"#).is_err());
    assert!(CursorRequest::parse("not json").is_err());
}

#[test]
fn allow_response_is_minimal() {
    let value: serde_json::Value = serde_json::from_str(&CursorResponse::allow().to_json()).unwrap();
    assert_eq!(value, json!({"permission": "allow"}));
}

#[test]
fn deny_response_carries_messages() {
    let value: serde_json::Value =
        serde_json::from_str(&CursorResponse::deny("lint failed").to_json()).unwrap();
    assert_eq!(
        value,
        json!({"permission": "deny", "userMessage": "lint failed", "agentMessage": "lint failed"})
    );
}

#[test]
fn continue_follows_permission() {
    assert_eq!(CursorResponse::allow().with_continue().continue_, Some(true));
    let denied: serde_json::Value =
        serde_json::from_str(&CursorResponse::deny("no").with_continue().to_json()).unwrap();
    assert_eq!(denied["continue"], false);
}

#[test]
fn exit_codes() {
    assert_eq!(BridgeExit::Allow.code(), 0);
    assert_eq!(BridgeExit::Deny.code(), 2);
    assert_eq!(BridgeExit::MalformedInput.code(), 3);
}
