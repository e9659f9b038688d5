// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hookwright's own preferences (`<config dir>/config.toml`).
//!
//! ```toml
//! log_level = "info"
//! scope = "project"
//!
//! [sync]
//! matcher = "*"
//! post_tool_matcher = "Edit|MultiEdit|Write"
//! timeout = 60
//!
//! [hooks]
//! disabled = ["config:lint:eslint", "config:notify"]
//! ```
//!
//! A missing file yields defaults. Command-line flags override every value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::invocation::{self, JobKey};
use crate::settings::SettingsScope;

/// File name of the preferences file inside the config directory.
pub const PREFS_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read preferences {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl PrefsError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    /// Default log filter when neither `HOOKWRIGHT_LOG` nor `--log-level` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Default settings scope for mutating commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<SettingsScope>,

    pub sync: SyncPrefs,

    pub hooks: HookPrefs,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncPrefs {
    /// Matcher for tool events other than `PostToolUse`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    /// Matcher for `PostToolUse`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_tool_matcher: Option<String>,

    /// Timeout for installed entries whose job declares none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookPrefs {
    /// Hook keys (`config:<group>:<job>`) or group keys (`config:<group>`)
    /// that run as no-ops
    pub disabled: Vec<String>,
}

impl Preferences {
    /// Default location, when a config directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        crate::env::hookwright_dir().map(|dir| dir.join(PREFS_FILE))
    }

    /// Load from the default location, or defaults.
    pub fn load_default() -> Result<Self, PrefsError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences file");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PrefsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map_err(|source| PrefsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Whether a hook key is disabled, directly or through its group.
    pub fn is_disabled(&self, key: &str) -> bool {
        let group = JobKey::parse(key).map(|k| invocation::group_key(&k.group));
        self.hooks
            .disabled
            .iter()
            .any(|d| d == key || group.as_deref() == Some(d.as_str()))
    }
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
