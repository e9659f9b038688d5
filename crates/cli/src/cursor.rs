// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor hook registration (`.cursor/hooks.json`).
//!
//! ```json
//! {
//!   "version": 1,
//!   "hooks": {
//!     "beforeShellExecution": [{"command": "hookwright cursor config:guard:no-push"}]
//!   }
//! }
//! ```
//!
//! Entries are identified by their exact command. Commands this tool did not
//! install are never touched.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Configuration;
use crate::events;
use crate::invocation::{self, JobKey, Ownership};
use crate::settings::io::{parse_json5_or_json, to_pretty_json, write_atomic};
use crate::settings::SettingsScope;
use crate::sync::{ActionKind, SyncError, SyncOptions, SyncReport};

/// Schema version written to new files.
pub const HOOKS_VERSION: u64 = 1;

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("failed to read Cursor hooks {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed Cursor hooks {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize Cursor hooks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write Cursor hooks {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CursorError {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => {
                Some(path)
            }
            Self::Serialize(_) => None,
        }
    }
}

/// Location of `hooks.json` for a scope.
///
/// Cursor has no local scope; it shares the project file.
pub fn hooks_path(scope: SettingsScope, cursor_dir: &Path, project_root: &Path) -> PathBuf {
    match scope {
        SettingsScope::User => cursor_dir.join("hooks.json"),
        SettingsScope::Project | SettingsScope::Local => {
            project_root.join(".cursor").join("hooks.json")
        }
    }
}

/// One registered command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorHook {
    pub command: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CursorHook {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            extra: Map::new(),
        }
    }
}

/// Native event name to commands, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CursorHookTable {
    events: Vec<(String, Vec<CursorHook>)>,
}

impl CursorHookTable {
    pub fn get(&self, event: &str) -> &[CursorHook] {
        self.events
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, hooks)| hooks.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CursorHook])> {
        self.events
            .iter()
            .map(|(name, hooks)| (name.as_str(), hooks.as_slice()))
    }

    fn entry(&mut self, event: &str) -> &mut Vec<CursorHook> {
        let index = match self.events.iter().position(|(name, _)| name == event) {
            Some(index) => index,
            None => {
                self.events.push((event.to_string(), Vec::new()));
                self.events.len() - 1
            }
        };
        &mut self.events[index].1
    }

    pub fn hook_count(&self) -> usize {
        self.events.iter().map(|(_, hooks)| hooks.len()).sum()
    }
}

impl Serialize for CursorHookTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.events.len()))?;
        for (event, hooks) in &self.events {
            map.serialize_entry(event, hooks)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CursorHookTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut events = Vec::with_capacity(raw.len());
        for (event, value) in raw {
            let hooks: Vec<CursorHook> = serde_json::from_value(value)
                .map_err(|e| D::Error::custom(format!("hooks.{event}: {e}")))?;
            events.push((event, hooks));
        }
        Ok(Self { events })
    }
}

/// Contents of a Cursor `hooks.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CursorHooksFile {
    #[serde(default = "default_version")]
    pub version: u64,

    #[serde(default)]
    pub hooks: CursorHookTable,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> u64 {
    HOOKS_VERSION
}

impl Default for CursorHooksFile {
    fn default() -> Self {
        Self {
            version: HOOKS_VERSION,
            hooks: CursorHookTable::default(),
            extra: Map::new(),
        }
    }
}

impl CursorHooksFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing or blank file is an empty registration.
    pub fn load(path: &Path) -> Result<Self, CursorError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(CursorError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        parse_json5_or_json(&content).map_err(|e| CursorError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), CursorError> {
        let json = to_pretty_json(self)?;
        write_atomic(path, &json).map_err(|source| CursorError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), hooks = self.hooks.hook_count(), "saved cursor hooks");
        Ok(())
    }

    /// Register a command for a native event; false if already present.
    pub fn add(&mut self, event: &str, command: &str) -> bool {
        let hooks = self.hooks.entry(event);
        if hooks.iter().any(|h| h.command == command) {
            return false;
        }
        hooks.push(CursorHook::new(command));
        true
    }

    /// Remove every command matching `predicate`, dropping emptied events.
    ///
    /// Returns the removed `(event, command)` pairs.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<(String, String)>
    where
        F: FnMut(&str, &CursorHook) -> bool,
    {
        let mut removed = Vec::new();
        for (event, hooks) in &mut self.hooks.events {
            let before = hooks.len();
            hooks.retain(|hook| {
                if predicate(event, hook) {
                    removed.push((event.clone(), hook.command.clone()));
                    false
                } else {
                    true
                }
            });
            if hooks.is_empty() && before > 0 {
                tracing::debug!(event = %event, "removed emptied cursor event");
            }
        }
        self.hooks.events.retain(|(_, hooks)| !hooks.is_empty());
        removed
    }
}

/// Reconcile a Cursor registration with the configuration.
///
/// Every named job is registered as `<exe> cursor config:<group>:<job>` under
/// each native event that delivers its canonical event. Owned commands that
/// no longer correspond to a declared job are removed; a command whose
/// logical identity matches a desired one is rewritten in place.
pub fn sync_cursor(
    file: &mut CursorHooksFile,
    config: &Configuration,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let ownership = Ownership::for_executable(&options.executable);
    let mut desired: Vec<(&'static str, String)> = Vec::new();

    for (group_name, group) in &config.groups {
        if !options.includes_group(group_name) {
            continue;
        }
        for canonical in group.canonical_events() {
            if !options.includes_event(&canonical) {
                continue;
            }
            let Some(spec) = group.event(&canonical) else {
                continue;
            };
            let natives = events::cursor_events_for(&canonical);
            if natives.is_empty() {
                tracing::debug!(group = %group_name, event = %canonical, "event has no Cursor equivalent");
                continue;
            }
            for (job_name, _) in spec.named_jobs() {
                let key = JobKey::new(group_name.as_str(), job_name)?;
                let command = invocation::build(
                    &options.executable,
                    invocation::BRIDGE_SUBCOMMAND,
                    &key,
                    &options.log_args,
                );
                for native in &natives {
                    desired.push((*native, command.clone()));
                }
            }
        }
    }

    let mut report = SyncReport::default();

    // Rewrite in place where only logging flags changed.
    for (native, command) in &desired {
        let identity = invocation::logical_identity(command);
        if let Some(hook) = file
            .hooks
            .entry(native)
            .iter_mut()
            .find(|h| h.command != *command && invocation::logical_identity(&h.command) == identity)
        {
            let previous = std::mem::replace(&mut hook.command, command.clone());
            report.record(
                ActionKind::Replace,
                native,
                command,
                Some(format!("command '{previous}' -> '{command}'")),
            );
        }
    }

    let removed = file.remove_where(|event, hook| {
        if !is_bridge_command(&ownership, &hook.command) {
            return false;
        }
        let canonical = events::canonicalize(event);
        let in_scope = ownership
            .group_of(&hook.command)
            .is_some_and(|g| options.includes_group(&g))
            && options.includes_event(canonical);
        in_scope && !desired.iter().any(|(n, c)| *n == event && *c == hook.command)
    });
    for (event, command) in removed {
        report.record(ActionKind::Remove, &event, &command, Some("no longer declared".into()));
    }

    for (native, command) in &desired {
        if file.add(native, command) {
            report.record(ActionKind::Add, native, command, None);
        }
    }
    // `entry` may have created empty events for desired natives.
    file.hooks.events.retain(|(_, hooks)| !hooks.is_empty());

    tracing::info!(summary = %report.summary(), "cursor sync complete");
    Ok(report)
}

/// Whether `command` is a bridge invocation installed by this tool.
pub fn is_bridge_command(ownership: &Ownership, command: &str) -> bool {
    ownership.owns(command)
        && invocation::tokenize(command)
            .get(1)
            .is_some_and(|w| w == invocation::BRIDGE_SUBCOMMAND)
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
