// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! `hookwright run <key>`: the Claude Code entry point.

mod common;

use common::Workspace;
use predicates::prelude::*;

const CONFIG: &str = r#"
guard:
  PreToolUse:
    jobs:
      - name: record
        run: cat > seen.json
      - name: deny
        run: echo no shell today >&2; exit 1
      - name: ts-only
        run: exit 1
        glob: ["*.ts"]
      - name: bash-only
        run: touch bash-ran
        only: tool == "Bash"
"#;

const BASH_PAYLOAD: &str =
    r#"{"hook_event_name":"PreToolUse","session_id":"s1","tool_name":"Bash","tool_input":{"command":"ls -la"}}"#;

#[test]
fn job_receives_the_payload_on_stdin() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:record"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .success();

    let seen: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.project().join("seen.json")).unwrap())
            .unwrap();
    assert_eq!(seen["tool_input"]["command"], "ls -la");
    assert_eq!(seen["session_id"], "s1");
}

#[test]
fn failing_job_blocks_with_exit_two() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:deny"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "job 'config:guard:deny' failed with exit code 1: no shell today",
        ));
}

#[test]
fn glob_filter_skips_unrelated_files() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:ts-only"])
        .write_stdin(
            r#"{"hook_event_name":"PreToolUse","tool_name":"Edit","tool_input":{"file_path":"src/main.rs"}}"#,
        )
        .assert()
        .success();
}

#[test]
fn only_condition_gates_the_job() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:bash-only"])
        .write_stdin(r#"{"hook_event_name":"PreToolUse","tool_name":"Read","tool_input":{}}"#)
        .assert()
        .success();
    assert!(!ws.project().join("bash-ran").exists());

    ws.cmd()
        .args(["run", "config:guard:bash-only"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .success();
    assert!(ws.project().join("bash-ran").exists());
}

#[test]
fn disabled_group_does_not_run() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);
    ws.write_prefs("[hooks]\ndisabled = [\"config:guard\"]\n");

    ws.cmd()
        .args(["run", "config:guard:deny"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .success();
}

#[test]
fn unknown_key_suggests_resync() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:gone"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hookwright sync"));
}

#[test]
fn log_flags_after_the_key_are_accepted() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);

    ws.cmd()
        .args(["run", "config:guard:record", "--log-level", "debug"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .success()
        .stderr(predicate::str::contains("running hook"));
}

#[test]
fn malformed_preferences_fail_fast() {
    let ws = Workspace::new();
    ws.write_config(CONFIG);
    ws.write_prefs("log_level = [");

    ws.cmd()
        .args(["run", "config:guard:record"])
        .write_stdin(BASH_PAYLOAD)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is valid TOML"));
}
