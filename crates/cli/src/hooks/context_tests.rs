// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;

#[test]
fn projects_tool_event_values() {
    let mut payload = HookPayload::tool(
        "PostToolUse",
        "Edit",
        json!({"file_path": "src/lib.rs", "edits": [{"file_path": "src/main.rs"}]}),
    );
    payload.session_id = Some("s-1".into());
    payload.cwd = Some("/work".into());

    let ctx = HookContext::new("config:lint:eslint", payload, PathBuf::from("/elsewhere"));

    assert_eq!(ctx.event, "PostToolUse");
    assert_eq!(ctx.cwd, PathBuf::from("/work"));
    assert_eq!(ctx.file(), "src/lib.rs");
    assert_eq!(ctx.env_var(ENV_EVENT), Some("PostToolUse"));
    assert_eq!(ctx.env_var(ENV_TOOL_NAME), Some("Edit"));
    assert_eq!(ctx.env_var(ENV_FILE_PATH), Some("src/lib.rs"));
    assert_eq!(ctx.env_var(ENV_FILES), Some("src/lib.rs\nsrc/main.rs"));
    assert_eq!(ctx.env_var(ENV_CWD), Some("/work"));
    assert_eq!(ctx.env_var(ENV_SESSION_ID), Some("s-1"));
    assert!(ctx.env_var(ENV_TOOL_INPUT).unwrap().contains("src/main.rs"));
    assert_eq!(ctx.env_var(ENV_PROMPT), None);
}

#[test]
fn falls_back_to_given_cwd_and_canonicalizes_event() {
    let mut payload = HookPayload::new("user_prompt_submit");
    payload.prompt = Some("/review".into());

    let ctx = HookContext::new("config:a:b", payload, PathBuf::from("/fallback"));

    assert_eq!(ctx.event, "UserPromptSubmit");
    assert_eq!(ctx.cwd, PathBuf::from("/fallback"));
    assert_eq!(ctx.env_var(ENV_PROMPT), Some("/review"));
    assert_eq!(ctx.env_var(ENV_FILES), None);
}

#[test]
fn extra_env_overrides() {
    let ctx = HookContext::new("config:a:b", HookPayload::new("Stop"), PathBuf::from("/"))
        .with_env(ENV_PROJECT_DIR, "/project")
        .with_env(ENV_CURSOR_CONVERSATION_ID, "c-9");

    assert_eq!(ctx.env_var("CLAUDE_PROJECT_DIR"), Some("/project"));
    assert_eq!(ctx.env_var(ENV_CURSOR_CONVERSATION_ID), Some("c-9"));
}

#[test]
fn facts_reflect_context() {
    let payload = HookPayload::tool("PreToolUse", "Bash", json!({"command": "ls"}));
    let ctx = HookContext::new("config:a:b", payload, PathBuf::from("/work"));
    let facts = ctx.facts();

    assert_eq!(facts.tool, "Bash");
    assert_eq!(facts.event, "PreToolUse");
    assert_eq!(facts.cwd, "/work");
    assert!(facts.files.is_empty());
}

#[test]
fn oversized_values_stay_out_of_the_environment() {
    let content = "x".repeat(256 * 1024);
    let payload = HookPayload::tool(
        "PreToolUse",
        "Write",
        json!({"file_path": "big.txt", "content": content}),
    );
    let ctx = HookContext::new("config:g:j", payload, PathBuf::from("/work"));

    assert_eq!(ctx.env_var(ENV_TOOL_INPUT), None);
    assert_eq!(ctx.env_var(ENV_TOOL_NAME), Some("Write"));
    assert_eq!(ctx.env_var(ENV_FILE_PATH), Some("big.txt"));
    assert!(ctx.env().values().all(|v| v.len() <= MAX_ENV_VALUE));
}
