// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn hook_failures_exit_blocking() {
    let err = Error::from(HookError::JobFailed {
        key: "config:g:j".into(),
        code: Some(1),
        message: "nope".into(),
    });
    assert_eq!(err.exit_code(), EXIT_BLOCKING);
    assert_eq!(err.to_string(), "job 'config:g:j' failed with exit code 1: nope");
}

#[test]
fn other_errors_exit_one() {
    assert_eq!(Error::NotFound("x".into()).exit_code(), 1);
    assert_eq!(Error::ChecksFailed(2).exit_code(), 1);
}

#[test]
fn malformed_settings_suggest_checking_the_file() {
    let err = Error::from(SettingsError::Parse {
        path: PathBuf::from("/repo/.claude/settings.json"),
        message: "expected value".into(),
    });
    assert!(err.to_string().contains("/repo/.claude/settings.json"));
    assert!(err
        .suggestion()
        .unwrap()
        .contains("/repo/.claude/settings.json is valid JSON"));
}

#[test]
fn unknown_event_points_at_event_list() {
    let err = Error::from(MergeError::UnknownEvent("BeforeLunch".into()));
    assert!(err.suggestion().unwrap().contains("hookwright events"));
}

#[test]
fn missing_config_names_first_candidate() {
    let err = Error::NoConfig(vec![
        PathBuf::from("/repo/.hookwright.yaml"),
        PathBuf::from("/repo/.hookwright.json"),
    ]);
    assert_eq!(
        err.to_string(),
        "no hook configuration found (looked for /repo/.hookwright.yaml, /repo/.hookwright.json)"
    );
    assert_eq!(
        err.suggestion().as_deref(),
        Some("create /repo/.hookwright.yaml to declare hook groups")
    );
}

#[test]
fn usage_errors_have_no_suggestion() {
    assert!(Error::Usage("bad".into()).suggestion().is_none());
}
