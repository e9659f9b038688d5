// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::prefs::Preferences;
use serde_json::json;

struct Fixture {
    _dir: tempfile::TempDir,
    ctx: Context,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("hookwright");
    std::fs::write(&exe, "#!/bin/sh\n").unwrap();
    let ctx = Context {
        project_root: dir.path().to_path_buf(),
        prefs: Preferences::default(),
        executable: exe,
        config_dir: None,
        claude_dir: None,
        cursor_dir: None,
    };
    Fixture { _dir: dir, ctx }
}

fn document(commands: &[String]) -> SettingsDocument {
    let hooks: Vec<_> = commands
        .iter()
        .map(|c| json!({"type": "command", "command": c}))
        .collect();
    serde_json::from_value(json!({
        "hooks": {"PreToolUse": [{"matcher": "*", "hooks": hooks}]}
    }))
    .unwrap()
}

fn config() -> Configuration {
    serde_yaml::from_str("lint:\n  PreToolUse:\n    jobs:\n      - name: eslint\n        run: npx eslint\n")
        .unwrap()
}

#[test]
fn healthy_install_passes() {
    let f = fixture();
    let exe = f.ctx.executable.display().to_string();
    let doc = document(&[format!("{exe} run config:lint:eslint"), "./foreign.sh".into()]);

    let checks = installed_checks(&f.ctx, &doc, Some(&config()));

    assert!(checks.iter().all(|c| c.ok), "{checks:?}");
    assert_eq!(checks.len(), 2);
}

#[test]
fn stale_and_undeclared_hooks_fail() {
    let f = fixture();
    let exe = f.ctx.executable.display().to_string();
    let doc = document(&[
        format!("{exe} run config:lint:eslint"),
        format!("{exe} run config:lint:prettier"),
        format!("{exe} run config:old:gone"),
    ]);

    let failed: Vec<String> = installed_checks(&f.ctx, &doc, Some(&config()))
        .into_iter()
        .filter(|c| !c.ok)
        .map(|c| c.message)
        .collect();

    assert_eq!(
        failed,
        vec![
            "stale groups installed: old (run `hookwright sync`)".to_string(),
            "installed hooks not declared in the configuration: config:lint:prettier".to_string(),
        ]
    );
}

#[test]
fn missing_executable_fails() {
    let f = fixture();
    let doc = document(&["/nowhere/hookwright run config:lint:eslint".to_string()]);

    let checks = installed_checks(&f.ctx, &doc, None);

    assert_eq!(checks.len(), 1);
    assert!(!checks[0].ok);
    assert!(checks[0].message.contains("/nowhere/hookwright not found"));
}

#[test]
fn executables_resolve_through_search_path() {
    let f = fixture();
    let dir = f.ctx.project_root.clone();
    let search = std::env::join_paths([Path::new("/nowhere"), dir.as_path()]).unwrap();

    assert_eq!(
        resolve_executable("hookwright", Some(&search)),
        Some(dir.join("hookwright"))
    );
    assert_eq!(resolve_executable("hookwright", None), None);
    assert_eq!(resolve_executable("missing-tool", Some(&search)), None);
    assert_eq!(
        resolve_executable(&f.ctx.executable.display().to_string(), None),
        Some(f.ctx.executable.clone())
    );
}
