// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::settings::io::parse_json5_or_json;

const SAMPLE: &str = r#"{
  "permissions": {
    "allow": ["Read"]
  },
  "hooks": {
    "PreToolUse": [
      {
        "matcher": "Bash",
        "hooks": [
          { "type": "command", "command": "~/.claude/hooks/rtk-rewrite.sh" },
          { "type": "command", "command": "/bin/hookwright run config:lint:shellcheck", "timeout": 30 }
        ]
      }
    ],
    "Stop": [
      { "hooks": [{ "type": "command", "command": "say done", "statusMessage": "speaking" }] }
    ]
  },
  "model": "opus"
}"#;

#[test]
fn parse_sample_document() {
    let doc: SettingsDocument = parse_json5_or_json(SAMPLE).unwrap();
    let pre = doc.hooks.get("PreToolUse").unwrap();
    assert_eq!(pre.len(), 1);
    assert_eq!(pre[0].matcher, "Bash");
    assert_eq!(pre[0].hooks.len(), 2);
    assert_eq!(pre[0].hooks[1].timeout, Some(30));

    let stop = doc.hooks.get("Stop").unwrap();
    assert_eq!(stop[0].matcher, "");
    assert_eq!(
        stop[0].hooks[0].extra.get("statusMessage"),
        Some(&Value::String("speaking".into()))
    );
    assert!(doc.extra.contains_key("permissions"));
    assert!(doc.extra.contains_key("model"));
}

#[test]
fn unknown_fields_survive_round_trip() {
    let doc: SettingsDocument = parse_json5_or_json(SAMPLE).unwrap();
    let json = doc.to_json().unwrap();
    let reparsed: SettingsDocument = parse_json5_or_json(&json).unwrap();
    assert_eq!(doc, reparsed);

    let value: Value = serde_json::from_str(&json).unwrap();
    let stop_hook = &value["hooks"]["Stop"][0];
    assert!(stop_hook.get("matcher").is_none());
    assert_eq!(stop_hook["hooks"][0]["statusMessage"], "speaking");
    assert_eq!(value["permissions"]["allow"][0], "Read");
}

#[test]
fn event_order_is_preserved() {
    let doc: SettingsDocument = parse_json5_or_json(
        r#"{"hooks": {"Stop": [], "PreToolUse": [], "Notification": []}}"#,
    )
    .unwrap();
    let names: Vec<_> = doc.hooks.event_names().collect();
    assert_eq!(names, vec!["Stop", "PreToolUse", "Notification"]);
}

#[test]
fn json5_timeouts_parse_as_integers() {
    let doc: SettingsDocument = parse_json5_or_json(
        r#"{
            // trailing commas and comments force the JSON5 path
            hooks: { PreToolUse: [{ matcher: "*", hooks: [{ type: "command", command: "x", timeout: 15, },], },], },
        }"#,
    )
    .unwrap();
    assert_eq!(doc.hooks.get("PreToolUse").unwrap()[0].hooks[0].timeout, Some(15));
}

#[test]
fn negative_timeout_is_rejected() {
    let result: Result<SettingsDocument, _> = serde_json::from_str(
        r#"{"hooks": {"Stop": [{"hooks": [{"command": "x", "timeout": -1}]}]}}"#,
    );
    assert!(result.is_err());
}

#[test]
fn entry_creates_event_at_end() {
    let mut table = HookTable::new();
    table.entry("Stop").push(MatcherEntry::new("", vec![HookCommand::new("a", None)]));
    table.entry("PreToolUse").push(MatcherEntry::new("*", vec![]));
    table.entry("Stop").push(MatcherEntry::new("", vec![HookCommand::new("b", None)]));

    let names: Vec<_> = table.event_names().collect();
    assert_eq!(names, vec!["Stop", "PreToolUse"]);
    assert_eq!(table.get("Stop").unwrap().len(), 2);
    assert_eq!(table.hook_count(), 2);
}

#[test]
fn empty_hooks_are_not_serialized() {
    let doc = SettingsDocument::new();
    assert_eq!(doc.to_json().unwrap(), "{}\n");
}

#[test]
fn new_command_has_command_type() {
    let json = serde_json::to_value(HookCommand::new("/bin/x run config:a:b", Some(10))).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "command", "command": "/bin/x run config:a:b", "timeout": 10})
    );
}

#[test]
fn remove_drops_event_and_keeps_order() {
    let mut table = HookTable::new();
    table.entry("Stop");
    table.entry("PreToolUse");
    table.entry("SessionEnd");

    assert!(table.remove("PreToolUse").is_some());
    assert!(table.remove("PreToolUse").is_none());
    assert_eq!(table.event_names().collect::<Vec<_>>(), vec!["Stop", "SessionEnd"]);
}

#[test]
fn empty_matcher_is_written_for_new_entries() {
    let entry = MatcherEntry::new("", vec![HookCommand::new("say done", None)]);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["matcher"], "");

    let read: MatcherEntry = serde_json::from_str(r#"{"hooks": []}"#).unwrap();
    assert!(serde_json::to_value(&read).unwrap().get("matcher").is_none());

    let mut retargeted = read;
    retargeted.matcher = "Bash".into();
    assert_eq!(serde_json::to_value(&retargeted).unwrap()["matcher"], "Bash");
}
