// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::hooks::{HookContext, HookError, HookFuture};

fn config(yaml: &str) -> Configuration {
    serde_yaml::from_str(yaml).unwrap()
}

struct Named(&'static str);

impl Hook for Named {
    fn run<'a>(&'a self, _ctx: &'a HookContext) -> HookFuture<'a> {
        Box::pin(async { Ok::<(), HookError>(()) })
    }

    fn description(&self) -> String {
        self.0.to_string()
    }
}

#[test]
fn new_registry_is_empty() {
    let registry = HookRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.get("config:g:j").is_none());
}

#[test]
fn register_replaces_existing_key() {
    let mut registry = HookRegistry::new();
    registry.register("custom:a", Arc::new(Named("first")));
    registry.register("custom:a", Arc::new(Named("second")));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("custom:a").unwrap().description(), "second");
}

#[test]
fn from_config_keys_every_named_job() {
    let registry = HookRegistry::from_config(&config(
        r#"
lint:
  PostToolUse:
    jobs:
      - name: eslint
        run: npx eslint {files}
      - run: echo unnamed
guard:
  pre_tool_use:
    jobs:
      - name: no-push
        run: ./deny.sh
"#,
    ));

    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec!["config:guard:no-push", "config:lint:eslint"]
    );
    assert_eq!(
        registry.get("config:guard:no-push").unwrap().description(),
        "./deny.sh [PreToolUse]"
    );
}

#[test]
fn job_declared_under_several_events_is_one_hook() {
    let registry = HookRegistry::from_config(&config(
        r#"
notify:
  Stop:
    jobs:
      - name: bell
        run: tput bel
  SubagentStop:
    jobs:
      - name: bell
        run: tput bel
"#,
    ));

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("config:notify:bell").unwrap().description(),
        "tput bel [Stop, SubagentStop]"
    );
}

#[test]
fn invalid_job_names_are_skipped() {
    let registry = HookRegistry::from_config(&config(
        r#"
lint:
  Stop:
    jobs:
      - name: "has space"
        run: "true"
      - name: ok
        run: "true"
"#,
    ));

    assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["config:lint:ok"]);
}
