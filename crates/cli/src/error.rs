// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level error type for commands.

use std::path::PathBuf;

use thiserror::Error;

use crate::bridge::BridgeError;
use crate::config::ConfigError;
use crate::cursor::CursorError;
use crate::hooks::HookError;
use crate::invocation::InvocationError;
use crate::merge::MergeError;
use crate::prefs::PrefsError;
use crate::settings::SettingsError;
use crate::sync::SyncError;

/// Exit code for a hook failure, which Claude Code treats as blocking.
pub const EXIT_BLOCKING: i32 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prefs(#[from] PrefsError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("no hook configuration found (looked for {})", format_paths(.0))]
    NoConfig(Vec<PathBuf>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0} check(s) failed")]
    ChecksFailed(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// An actionable hint for the user, if there is one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Settings(SettingsError::Parse { path, .. }) => Some(format!(
                "check that {} is valid JSON, or move it aside to start fresh",
                path.display()
            )),
            Self::Settings(e) => e
                .path()
                .map(|p| format!("check that {} is readable and writable", p.display())),
            Self::Config(ConfigError::Parse { path, .. }) => Some(format!(
                "check that {} is valid YAML or JSON",
                path.display()
            )),
            Self::Config(ConfigError::Read { path, .. }) => {
                Some(format!("check that {} is readable", path.display()))
            }
            Self::Config(ConfigError::Invalid(_)) => {
                Some("fix the problems above, then run `hookwright validate`".into())
            }
            Self::Prefs(e) => Some(format!("check that {} is valid TOML", e.path().display())),
            Self::Merge(MergeError::UnknownEvent(_)) => {
                Some("run `hookwright events` to list valid events".into())
            }
            Self::Hook(HookError::UnknownHook(_)) => {
                Some("run `hookwright sync` to reinstall hooks from the configuration".into())
            }
            Self::Cursor(e) => e
                .path()
                .map(|p| format!("check that {} is valid JSON", p.display())),
            Self::NoConfig(paths) => paths
                .first()
                .map(|p| format!("create {} to declare hook groups", p.display())),
            Self::NotFound(_) => Some("run `hookwright list` to see installed hooks".into()),
            Self::Invocation(_) => {
                Some("group and job names may not contain ':' or whitespace".into())
            }
            _ => None,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Hook(_) => EXIT_BLOCKING,
            _ => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
