// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

#[parameterized(
    canonical_pre_tool = { "PreToolUse", &["beforeShellExecution", "beforeMCPExecution", "beforeReadFile"] },
    native_shell = { "beforeShellExecution", &["beforeShellExecution"] },
    native_stop = { "stop", &["stop"] },
    post_tool = { "post_tool_use", &["afterFileEdit"] },
)]
fn cursor_targets_by_event(event: &str, expected: &[&str]) {
    assert_eq!(cursor_targets(event).unwrap(), expected);
}

#[test]
fn cursor_targets_reject_events_without_a_cursor_hook() {
    assert!(matches!(cursor_targets("SessionStart"), Err(Error::Usage(_))));
    assert!(matches!(
        cursor_targets("BeforeLunch"),
        Err(Error::Merge(MergeError::UnknownEvent(_)))
    ));
}

#[test]
fn duplicate_reports_no_change() {
    let report = report_for(
        &MergeResult::Duplicate {
            event: "Stop".into(),
            matcher: String::new(),
        },
        "./notify.sh",
    );
    assert!(report.is_empty());
}

#[test]
fn replaced_carries_the_changes() {
    let report = report_for(
        &MergeResult::Replaced {
            event: "PreToolUse".into(),
            changes: vec!["timeout 30s -> 60s".into()],
        },
        "./guard.sh",
    );
    assert_eq!(report.replaced, 1);
    assert_eq!(
        report.actions[0].to_string(),
        "replace PreToolUse: ./guard.sh (timeout 30s -> 60s)"
    );
}
