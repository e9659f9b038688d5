// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::invocation::Ownership;
use crate::settings::io::parse_json5_or_json;

const LINT: &str = "/bin/hookwright run config:lint:eslint";
const FMT: &str = "/bin/hookwright run config:fmt:prettier";
const FOREIGN: &str = "~/.claude/hooks/rtk-rewrite.sh";

fn doc(json: &str) -> SettingsDocument {
    parse_json5_or_json(json).unwrap()
}

fn owned(command: &str) -> bool {
    Ownership::new("hookwright").owns(command)
}

fn commands(doc: &SettingsDocument, event: &str) -> Vec<(String, String, Option<u64>)> {
    doc.hooks
        .get(event)
        .unwrap_or_default()
        .iter()
        .flat_map(|e| {
            e.hooks
                .iter()
                .map(move |h| (e.matcher.clone(), h.command.clone(), h.timeout))
        })
        .collect()
}

#[test]
fn adds_new_entry() {
    let mut d = SettingsDocument::new();
    let result = add_entry(&mut d, "PostToolUse", "Edit|Write", LINT, Some(30)).unwrap();

    assert_eq!(
        result,
        MergeResult::Added {
            event: "PostToolUse".into(),
            matcher: "Edit|Write".into()
        }
    );
    assert_eq!(
        commands(&d, "PostToolUse"),
        vec![("Edit|Write".into(), LINT.into(), Some(30))]
    );
}

#[test]
fn alias_event_is_canonicalized() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "afterFileEdit", "*", LINT, None).unwrap();
    assert!(d.hooks.get("PostToolUse").is_some());
    assert!(d.hooks.get("afterFileEdit").is_none());
}

#[test]
fn unknown_event_is_rejected_without_mutation() {
    let mut d = SettingsDocument::new();
    let err = add_entry(&mut d, "BeforeLunch", "*", LINT, None).unwrap_err();
    assert_eq!(err, MergeError::UnknownEvent("BeforeLunch".into()));
    assert!(d.hooks.is_empty());

    assert_eq!(
        add_entry(&mut d, "Stop", "", "  ", None).unwrap_err(),
        MergeError::EmptyCommand
    );
}

#[test]
fn identical_add_is_duplicate_and_leaves_document_unchanged() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "Bash", LINT, Some(10)).unwrap();
    let before = d.to_json().unwrap();

    let result = add_entry(&mut d, "PreToolUse", "Bash", LINT, Some(10)).unwrap();

    assert!(matches!(result, MergeResult::Duplicate { .. }));
    assert!(!result.is_change());
    assert_eq!(d.to_json().unwrap(), before);
}

#[test]
fn different_timeout_is_replaced_in_place() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "Bash", LINT, Some(10)).unwrap();
    add_entry(&mut d, "PreToolUse", "Bash", FMT, None).unwrap();

    let result = add_entry(&mut d, "PreToolUse", "Bash", LINT, Some(60)).unwrap();

    assert_eq!(
        result,
        MergeResult::Replaced {
            event: "PreToolUse".into(),
            changes: vec!["timeout 10s -> 60s".into()]
        }
    );
    assert_eq!(
        commands(&d, "PreToolUse"),
        vec![
            ("Bash".into(), LINT.into(), Some(60)),
            ("Bash".into(), FMT.into(), None),
        ]
    );
}

#[test]
fn log_flag_change_replaces_same_logical_hook() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "Stop", "", LINT, None).unwrap();

    let verbose = format!("{LINT} --log-level debug");
    let result = add_entry(&mut d, "Stop", "", &verbose, None).unwrap();

    assert!(matches!(result, MergeResult::Replaced { .. }));
    assert!(result.message().contains("command"));
    assert_eq!(commands(&d, "Stop"), vec![(String::new(), verbose, None)]);
}

#[test]
fn matcher_change_renames_single_hook_entry() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PostToolUse", "Edit", LINT, None).unwrap();

    let result = add_entry(&mut d, "PostToolUse", "Edit|Write", LINT, None).unwrap();

    assert!(result.message().contains("matcher 'Edit' -> 'Edit|Write'"));
    assert_eq!(d.hooks.get("PostToolUse").unwrap().len(), 1);
    assert_eq!(
        commands(&d, "PostToolUse"),
        vec![("Edit|Write".into(), LINT.into(), None)]
    );
}

#[test]
fn matcher_change_splits_shared_entry() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PostToolUse", "Edit", LINT, None).unwrap();
    add_entry(&mut d, "PostToolUse", "Edit", FOREIGN, None).unwrap();

    add_entry(&mut d, "PostToolUse", "*", LINT, None).unwrap();

    assert_eq!(
        commands(&d, "PostToolUse"),
        vec![
            ("Edit".into(), FOREIGN.into(), None),
            ("*".into(), LINT.into(), None),
        ]
    );
}

#[test]
fn matcher_change_moves_into_existing_entry() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "*", FOREIGN, None).unwrap();
    add_entry(&mut d, "PreToolUse", "Bash", LINT, None).unwrap();

    add_entry(&mut d, "PreToolUse", "*", LINT, None).unwrap();

    let entries = d.hooks.get("PreToolUse").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].hooks.len(), 2);
}

#[test]
fn legacy_duplicates_are_removed_on_replace() {
    let mut d = doc(&format!(
        r#"{{"hooks": {{"Stop": [
            {{"hooks": [{{"type": "command", "command": "{LINT}"}}]}},
            {{"matcher": "x", "hooks": [{{"type": "command", "command": "{LINT} -v"}}]}}
        ]}}}}"#
    ));

    let result = add_entry(&mut d, "Stop", "", LINT, Some(5)).unwrap();

    assert!(result.message().contains("removed 1 legacy duplicate(s)"));
    assert_eq!(commands(&d, "Stop"), vec![(String::new(), LINT.into(), Some(5))]);
}

#[test]
fn appends_to_first_entry_with_same_matcher() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "Bash", FOREIGN, None).unwrap();
    add_entry(&mut d, "PreToolUse", "Read", FMT, None).unwrap();
    add_entry(&mut d, "PreToolUse", "Bash", LINT, None).unwrap();

    let entries = d.hooks.get("PreToolUse").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].hooks.len(), 2);
}

#[test]
fn remove_entry_matches_logical_identity() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "Stop", "", &format!("{LINT} --verbose"), None).unwrap();
    add_entry(&mut d, "Stop", "", FOREIGN, None).unwrap();

    assert_eq!(remove_entry(&mut d, LINT), 1);
    assert_eq!(commands(&d, "Stop"), vec![(String::new(), FOREIGN.into(), None)]);
    assert_eq!(remove_entry(&mut d, LINT), 0);
}

#[test]
fn remove_by_group_respects_event_filter() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "*", LINT, None).unwrap();
    add_entry(&mut d, "PostToolUse", "*", LINT, None).unwrap();
    add_entry(&mut d, "PostToolUse", "*", FMT, None).unwrap();

    let owner = Ownership::new("hookwright");
    assert_eq!(remove_by_group(&mut d, "lint", Some("afterFileEdit"), &owner), 1);
    assert!(d.hooks.get("PreToolUse").is_some());
    assert_eq!(commands(&d, "PostToolUse").len(), 1);

    assert_eq!(remove_by_group(&mut d, "lint", None, &owner), 1);
    assert!(d.hooks.get("PreToolUse").is_none());
}

#[test]
fn remove_by_group_spares_foreign_commands_naming_the_group() {
    let wrapper = "./wrapper.sh run config:lint:eslint";
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "*", LINT, None).unwrap();
    add_entry(&mut d, "PreToolUse", "*", wrapper, None).unwrap();

    assert_eq!(remove_by_group(&mut d, "lint", None, &Ownership::new("hookwright")), 1);
    assert_eq!(
        commands(&d, "PreToolUse"),
        vec![("*".to_string(), wrapper.to_string(), None)]
    );
}

#[test]
fn remove_all_keeps_foreign_entries_verbatim() {
    let source = format!(
        r#"{{
  "model": "opus",
  "hooks": {{
    "PreToolUse": [
      {{"matcher": "Bash", "hooks": [{{"type": "command", "command": "{FOREIGN}", "statusMessage": "rewriting"}}]}},
      {{"matcher": "*", "hooks": [{{"type": "command", "command": "{LINT}"}}]}}
    ],
    "Stop": [{{"hooks": [{{"type": "command", "command": "{FMT}"}}]}}]
  }}
}}"#
    );
    let mut d = doc(&source);

    assert_eq!(remove_all(&mut d, owned), 2);

    let expected = doc(&format!(
        r#"{{
  "model": "opus",
  "hooks": {{
    "PreToolUse": [
      {{"matcher": "Bash", "hooks": [{{"type": "command", "command": "{FOREIGN}", "statusMessage": "rewriting"}}]}}
    ]
  }}
}}"#
    ));
    assert_eq!(d.to_json().unwrap(), expected.to_json().unwrap());
}

#[test]
fn removal_leaves_preexisting_empty_entries_alone() {
    let mut d = doc(&format!(
        r#"{{"hooks": {{
            "Notification": [],
            "Stop": [{{"matcher": "", "hooks": []}}, {{"hooks": [{{"command": "{LINT}"}}]}}]
        }}}}"#
    ));

    assert_eq!(remove_all(&mut d, owned), 1);

    assert_eq!(d.hooks.get("Notification").unwrap().len(), 0);
    assert_eq!(d.hooks.get("Stop").unwrap().len(), 1);
}

#[test]
fn owned_entries_lists_only_owned_commands() {
    let mut d = SettingsDocument::new();
    add_entry(&mut d, "PreToolUse", "Bash", FOREIGN, None).unwrap();
    add_entry(&mut d, "PreToolUse", "Bash", LINT, Some(30)).unwrap();

    assert_eq!(
        owned_entries(&d, owned),
        vec![InstalledEntry {
            event: "PreToolUse".into(),
            matcher: "Bash".into(),
            command: LINT.into(),
            timeout: Some(30),
        }]
    );
}

#[test]
fn unknown_event_message_lists_valid_events() {
    let message = MergeError::UnknownEvent("BeforeLunch".into()).to_string();
    assert!(message.starts_with("unknown event 'BeforeLunch' (valid events: PreToolUse, "));
    assert!(message.contains("SessionEnd"));
}
