// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::path::Path;

const EXE: &str = "/usr/local/bin/hookwright";

fn ownership() -> Ownership {
    Ownership::for_executable(Path::new(EXE))
}

#[test]
fn selection_requires_a_target() {
    let args = UninstallArgs::default();
    assert!(matches!(Selection::from_args(&args), Err(Error::Usage(_))));

    let args = UninstallArgs {
        group: Some("lint".into()),
        event: Some("Stop".into()),
        ..UninstallArgs::default()
    };
    assert_eq!(
        Selection::from_args(&args).unwrap(),
        Selection::Group {
            group: "lint",
            event: Some("Stop"),
        }
    );
}

#[test]
fn cursor_command_selection_ignores_log_flags() {
    let selection = Selection::Command("/usr/local/bin/hookwright cursor config:g:j");
    assert!(selection.selects_cursor(
        &ownership(),
        "stop",
        &format!("{EXE} cursor config:g:j --verbose")
    ));
    assert!(!selection.selects_cursor(&ownership(), "stop", &format!("{EXE} cursor config:g:k")));
}

#[test]
fn cursor_group_selection_honors_event_aliases() {
    let selection = Selection::Group {
        group: "guard",
        event: Some("PreToolUse"),
    };
    let command = format!("{EXE} cursor config:guard:no-push");
    assert!(selection.selects_cursor(&ownership(), "beforeShellExecution", &command));
    assert!(!selection.selects_cursor(&ownership(), "stop", &command));
    assert!(!selection.selects_cursor(&ownership(), "beforeShellExecution", "./guard config:guard:x"));
}

#[test]
fn cursor_all_selection_keeps_foreign_hooks() {
    assert!(Selection::All.selects_cursor(&ownership(), "stop", &format!("{EXE} cursor config:a:b")));
    assert!(!Selection::All.selects_cursor(&ownership(), "stop", "./notify.sh"));
}
