// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::SettingsScope;

/// Declarative hooks for Claude Code and Cursor
#[derive(Parser, Debug)]
#[command(name = "hookwright", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags accepted before or after any subcommand.
///
/// Installed invocations may carry the logging flags, so they must parse
/// after `run <key>` too.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Project root (defaults to $HOOKWRIGHT_PROJECT_DIR, $CLAUDE_PROJECT_DIR, or the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `hookwright=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Append logs to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append logs to hookwright.log in the config directory
    #[arg(long, global = true)]
    pub log: bool,

    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log errors only
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Executable recorded in installed invocations (defaults to this binary)
    #[arg(long, global = true, hide = true, value_name = "PATH")]
    pub executable: Option<PathBuf>,
}

impl GlobalArgs {
    /// Log level implied by the flags, if any.
    pub fn level_flag(&self) -> Option<&str> {
        if let Some(level) = &self.log_level {
            Some(level)
        } else if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else if self.log {
            Some("info")
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile installed hooks with the configuration
    Sync(SyncArgs),

    /// Install a single hook command
    Install(InstallArgs),

    /// Remove installed hook commands
    Uninstall(UninstallArgs),

    /// List installed hook commands
    List(ListArgs),

    /// Run a hook for a Claude Code event (reads the payload from stdin)
    Run {
        /// Hook key, e.g. `config:lint:eslint`
        key: String,
    },

    /// Run a hook for a Cursor event (JSON request on stdin, response on stdout)
    Cursor {
        /// Hook key, e.g. `config:guard:no-push`
        key: String,
    },

    /// Check the hook configuration
    Validate,

    /// List lifecycle events
    Events,

    /// Diagnose configuration and installed hooks
    Doctor(DoctorArgs),
}

/// Integration platform to write to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Claude Code settings.json
    #[default]
    Claude,
    /// Cursor hooks.json
    Cursor,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Settings scope to write
    #[arg(long, value_enum)]
    pub scope: Option<SettingsScope>,

    /// Only sync this group
    #[arg(long)]
    pub group: Option<String>,

    /// Only sync this event
    #[arg(long)]
    pub event: Option<String>,

    /// Timeout in seconds for every installed entry, overriding job timeouts
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Matcher for tool events other than PostToolUse
    #[arg(long)]
    pub matcher: Option<String>,

    /// Matcher for PostToolUse
    #[arg(long)]
    pub post_tool_matcher: Option<String>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Platform to write
    #[arg(long, value_enum, default_value_t)]
    pub platform: Platform,

    /// Log level passed to installed invocations
    #[arg(long, value_name = "LEVEL")]
    pub hook_log_level: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Event name (any spelling, e.g. PreToolUse or beforeShellExecution)
    pub event: String,

    /// Command to run
    pub command: String,

    /// Tool matcher (Claude Code only)
    #[arg(long)]
    pub matcher: Option<String>,

    /// Timeout in seconds (Claude Code only)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Settings scope to write
    #[arg(long, value_enum)]
    pub scope: Option<SettingsScope>,

    /// Platform to write
    #[arg(long, value_enum, default_value_t)]
    pub platform: Platform,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UninstallArgs {
    /// Command to remove (exact, or same hook with different logging flags)
    #[arg(conflicts_with_all = ["group", "all"])]
    pub command: Option<String>,

    /// Remove every hook of a group
    #[arg(long, conflicts_with = "all")]
    pub group: Option<String>,

    /// With --group, only this event
    #[arg(long, requires = "group")]
    pub event: Option<String>,

    /// Remove every hook installed by hookwright
    #[arg(long)]
    pub all: bool,

    /// Settings scope to write
    #[arg(long, value_enum)]
    pub scope: Option<SettingsScope>,

    /// Platform to write
    #[arg(long, value_enum, default_value_t)]
    pub platform: Platform,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Settings scope to read
    #[arg(long, value_enum)]
    pub scope: Option<SettingsScope>,

    /// Print JSON
    #[arg(long)]
    pub json: bool,

    /// Include hooks not installed by hookwright
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DoctorArgs {
    /// Settings scope to check
    #[arg(long, value_enum)]
    pub scope: Option<SettingsScope>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
