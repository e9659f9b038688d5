// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All environment variables read by hookwright are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `HOOKWRIGHT_CONFIG_DIR`: Overrides the hookwright config directory.
pub fn config_dir() -> Option<PathBuf> {
    var_path(names::HOOKWRIGHT_CONFIG_DIR)
}

/// `HOOKWRIGHT_PROJECT_DIR`: Overrides project root discovery.
pub fn project_dir() -> Option<PathBuf> {
    var_path(names::HOOKWRIGHT_PROJECT_DIR)
}

/// `HOOKWRIGHT_LOG`: Log filter directive (tracing `EnvFilter` syntax).
pub fn log_filter() -> Option<String> {
    var_non_empty(names::HOOKWRIGHT_LOG)
}

/// `CLAUDE_CONFIG_DIR`: Standard Claude Code config directory.
pub fn claude_config_dir() -> Option<PathBuf> {
    var_path(names::CLAUDE_CONFIG_DIR)
}

/// `CLAUDE_PROJECT_DIR`: Project root as reported by Claude Code to hooks.
pub fn claude_project_dir() -> Option<PathBuf> {
    var_path(names::CLAUDE_PROJECT_DIR)
}

/// `CURSOR_CONFIG_DIR`: Overrides `~/.cursor` for user-scope Cursor hooks.
pub fn cursor_config_dir() -> Option<PathBuf> {
    var_path(names::CURSOR_CONFIG_DIR)
}

/// `XDG_CONFIG_HOME`: Base directory for user configuration.
pub fn xdg_config_home() -> Option<PathBuf> {
    var_path(names::XDG_CONFIG_HOME)
}

/// `HOME`: User's home directory.
pub fn home() -> Option<PathBuf> {
    var_path(names::HOME)
}

/// `PATH`: Executable search path.
pub fn search_path() -> Option<std::ffi::OsString> {
    std::env::var_os(names::PATH).filter(|v| !v.is_empty())
}

/// The `~/.claude` directory, honoring `CLAUDE_CONFIG_DIR`.
pub fn claude_dir() -> Option<PathBuf> {
    claude_config_dir().or_else(|| home().map(|h| h.join(".claude")))
}

/// The hookwright config directory.
///
/// `HOOKWRIGHT_CONFIG_DIR`, else `$XDG_CONFIG_HOME/hookwright`, else
/// `~/.config/hookwright`.
pub fn hookwright_dir() -> Option<PathBuf> {
    config_dir()
        .or_else(|| xdg_config_home().map(|x| x.join("hookwright")))
        .or_else(|| home().map(|h| h.join(".config").join("hookwright")))
}

/// The `~/.cursor` directory, honoring `CURSOR_CONFIG_DIR`.
pub fn cursor_dir() -> Option<PathBuf> {
    cursor_config_dir().or_else(|| home().map(|h| h.join(".cursor")))
}

fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn var_path(name: &str) -> Option<PathBuf> {
    var_non_empty(name).map(PathBuf::from)
}
