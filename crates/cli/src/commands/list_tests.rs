// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn entry(event: &str, matcher: &str, command: &str, timeout: Option<u64>) -> InstalledEntry {
    InstalledEntry {
        event: event.into(),
        matcher: matcher.into(),
        command: command.into(),
        timeout,
    }
}

#[test]
fn entries_grouped_by_event() {
    let entries = vec![
        entry("PreToolUse", "Bash", "hookwright run config:guard:a", Some(30)),
        entry("PreToolUse", "*", "hookwright run config:guard:b", None),
        entry("Stop", "", "hookwright run config:bell:ring", None),
    ];

    assert_eq!(
        format_entries(&entries),
        "PreToolUse\n  [Bash] hookwright run config:guard:a (timeout 30s)\n  [*] hookwright run config:guard:b\nStop\n  hookwright run config:bell:ring\n"
    );
}

#[test]
fn json_keeps_missing_timeout_as_null() {
    let value = entry_json(&entry("Stop", "", "x", None));
    assert_eq!(value["timeout"], Value::Null);
    assert_eq!(value["event"], "Stop");
}
