// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared fixtures for driving the hookwright binary.
//!
//! Every workspace gets its own home, Claude, Cursor, and hookwright
//! directories so tests never touch the real user configuration.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A scratch home directory with one project inside it.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("project")).unwrap();
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    pub fn project(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home().join(".config").join("hookwright")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.project().join(".claude").join("settings.json")
    }

    pub fn cursor_path(&self) -> PathBuf {
        self.project().join(".cursor").join("hooks.json")
    }

    /// Write the project hook configuration.
    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.project().join(".hookwright.yaml"), yaml).unwrap();
    }

    /// Write the user preferences file.
    pub fn write_prefs(&self, toml: &str) {
        write(&self.config_dir().join("config.toml"), toml);
    }

    pub fn write_settings(&self, value: &Value) {
        write(&self.settings_path(), &serde_json::to_string_pretty(value).unwrap());
    }

    pub fn settings(&self) -> Value {
        read_json(&self.settings_path())
    }

    pub fn cursor_hooks(&self) -> Value {
        read_json(&self.cursor_path())
    }

    /// Commands installed under one Claude Code event, in order.
    pub fn commands(&self, event: &str) -> Vec<String> {
        let settings = self.settings();
        settings["hooks"][event]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .flat_map(|entry| entry["hooks"].as_array().cloned().unwrap_or_default())
                    .map(|hook| hook["command"].as_str().unwrap().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The binary, isolated to this workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(hookwright_bin());
        cmd.current_dir(self.project())
            .env("HOME", self.home())
            .env("CLAUDE_CONFIG_DIR", self.home().join(".claude"))
            .env("CURSOR_CONFIG_DIR", self.home().join(".cursor"))
            .env("HOOKWRIGHT_CONFIG_DIR", self.config_dir())
            .env("HOOKWRIGHT_PROJECT_DIR", self.project())
            .env_remove("CLAUDE_PROJECT_DIR")
            .env_remove("HOOKWRIGHT_LOG")
            .env_remove("XDG_CONFIG_HOME");
        cmd
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

pub fn hookwright_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hookwright"))
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
