// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand implementations.
//!
//! Every command resolves a [`Context`] first. Flags take precedence over
//! preferences, and preferences over built-in defaults.

mod cursor;
mod doctor;
mod events;
mod install;
mod list;
mod run;
mod sync;
mod uninstall;
mod validate;

use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command, GlobalArgs, SyncArgs};
use crate::config::{ConfigLoader, ConfigPaths, Configuration};
use crate::cursor::hooks_path;
use crate::env;
use crate::error::{Error, Result};
use crate::events::{canonicalize, is_valid_event};
use crate::invocation::Ownership;
use crate::logging;
use crate::merge::MergeError;
use crate::output::print_warning;
use crate::prefs::{PrefsError, Preferences};
use crate::settings::{SettingsScope, SettingsStore};
use crate::sync::{SyncOptions, SyncReport};

/// Resolved environment shared by all commands.
#[derive(Clone, Debug)]
pub struct Context {
    /// Project whose settings and configuration are used
    pub project_root: PathBuf,
    /// User preferences
    pub prefs: Preferences,
    /// Executable recorded in installed invocations
    pub executable: PathBuf,
    /// hookwright config directory (global hook file and preferences)
    pub config_dir: Option<PathBuf>,
    /// Claude Code config directory
    pub claude_dir: Option<PathBuf>,
    /// Cursor config directory
    pub cursor_dir: Option<PathBuf>,
}

impl Context {
    /// Resolve the context from global flags and the environment.
    ///
    /// `root_hint` is used when neither a flag nor an environment variable
    /// names the project root.
    pub fn resolve(global: &GlobalArgs, prefs: Preferences, root_hint: Option<&Path>) -> Result<Self> {
        let project_root = match global
            .project_dir
            .clone()
            .or_else(env::project_dir)
            .or_else(env::claude_project_dir)
            .or_else(|| root_hint.map(Path::to_path_buf))
        {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let executable = match &global.executable {
            Some(exe) => exe.clone(),
            None => std::env::current_exe()?,
        };

        Ok(Self {
            project_root,
            prefs,
            executable,
            config_dir: env::hookwright_dir(),
            claude_dir: env::claude_dir(),
            cursor_dir: env::cursor_dir(),
        })
    }

    pub fn config_paths(&self) -> ConfigPaths {
        ConfigPaths::resolve(self.config_dir.as_deref(), &self.project_root)
    }

    /// Load the hook configuration without validating it.
    pub fn load_unchecked(&self) -> Result<(ConfigLoader, Configuration)> {
        let paths = self.config_paths();
        let loader = ConfigLoader::new(paths.clone());
        match loader.load()? {
            Some(config) => Ok((loader, config)),
            None => {
                let mut candidates = paths.project;
                candidates.extend(paths.global);
                Err(Error::NoConfig(candidates))
            }
        }
    }

    /// Load and validate the hook configuration.
    pub fn load_config(&self) -> Result<Configuration> {
        let (_, config) = self.load_unchecked()?;
        config.validate()?;
        for location in config.unnamed_jobs() {
            tracing::warn!(location = %location, "skipping unnamed jobs");
        }
        Ok(config)
    }

    /// Scope to operate on.
    pub fn scope(&self, flag: Option<SettingsScope>) -> SettingsScope {
        flag.or(self.prefs.scope).unwrap_or_default()
    }

    /// Settings store able to address `scope`.
    pub fn settings_store(&self, scope: SettingsScope) -> Result<SettingsStore> {
        let claude_dir = match (&self.claude_dir, scope) {
            (Some(dir), _) => dir.clone(),
            (None, SettingsScope::User) => {
                return Err(Error::Usage(
                    "cannot locate the Claude Code config directory; set CLAUDE_CONFIG_DIR or HOME"
                        .into(),
                ))
            }
            (None, _) => PathBuf::new(),
        };
        Ok(SettingsStore::new(claude_dir, &self.project_root))
    }

    /// Path of the Cursor hooks file for `scope`.
    pub fn cursor_path(&self, scope: SettingsScope) -> Result<PathBuf> {
        match (&self.cursor_dir, scope) {
            (Some(dir), _) => Ok(hooks_path(scope, dir, &self.project_root)),
            (None, SettingsScope::User) => Err(Error::Usage(
                "cannot locate the Cursor config directory; set CURSOR_CONFIG_DIR or HOME".into(),
            )),
            (None, _) => Ok(hooks_path(scope, Path::new(""), &self.project_root)),
        }
    }

    pub fn ownership(&self) -> Ownership {
        Ownership::for_executable(&self.executable)
    }

    /// Sync options from flags, then preferences, then defaults.
    pub fn sync_options(&self, args: &SyncArgs) -> Result<SyncOptions> {
        if let Some(event) = &args.event {
            if !is_valid_event(canonicalize(event)) {
                return Err(MergeError::UnknownEvent(event.clone()).into());
            }
        }

        let mut options = SyncOptions::new(&self.executable);
        options.group = args.group.clone();
        options.event = args.event.clone();
        if let Some(matcher) = args.matcher.clone().or_else(|| self.prefs.sync.matcher.clone()) {
            options.default_matcher = matcher;
        }
        if let Some(matcher) = args
            .post_tool_matcher
            .clone()
            .or_else(|| self.prefs.sync.post_tool_matcher.clone())
        {
            options.post_tool_matcher = matcher;
        }
        options.timeout_override = args.timeout;
        options.default_timeout = self.prefs.sync.timeout;
        if let Some(level) = &args.hook_log_level {
            options.log_args = vec!["--log-level".to_string(), level.clone()];
        }
        Ok(options)
    }
}

/// Print the per-hook actions and the count line of a mutation.
pub(crate) fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "would " } else { "" };
    for action in &report.actions {
        println!("{prefix}{action}");
    }
    println!("{}", report.summary());
}

/// Run the parsed command line, returning the process exit code.
pub async fn execute(cli: Cli) -> Result<i32> {
    let prefs = Preferences::load_default();
    init_logging(&cli.global, prefs.as_ref().ok());
    let global = &cli.global;

    match cli.command {
        Command::Cursor { key } => Ok(cursor::run(global, prefs, &key).await),
        Command::Doctor(args) => {
            let (prefs, prefs_error) = split_prefs(prefs);
            let ctx = Context::resolve(global, prefs, None)?;
            doctor::run(&ctx, &args, prefs_error.as_ref())
        }
        Command::Events => events::run(),
        Command::Sync(args) => sync::run(&context(global, prefs)?, &args),
        Command::Install(args) => install::run(&context(global, prefs)?, &args),
        Command::Uninstall(args) => uninstall::run(&context(global, prefs)?, &args),
        Command::List(args) => list::run(&context(global, prefs)?, &args),
        Command::Run { key } => run::run(&context(global, prefs)?, &key).await,
        Command::Validate => validate::run(&context(global, prefs)?),
    }
}

fn context(global: &GlobalArgs, prefs: Result<Preferences, PrefsError>) -> Result<Context> {
    Context::resolve(global, prefs?, None)
}

fn split_prefs(prefs: Result<Preferences, PrefsError>) -> (Preferences, Option<PrefsError>) {
    match prefs {
        Ok(prefs) => (prefs, None),
        Err(e) => (Preferences::default(), Some(e)),
    }
}

fn init_logging(global: &GlobalArgs, prefs: Option<&Preferences>) {
    let directive = logging::directive(
        env::log_filter(),
        global.level_flag(),
        prefs.and_then(|p| p.log_level.as_deref()),
    );
    let file = global.log_file.clone().or_else(|| {
        global
            .log
            .then(env::hookwright_dir)
            .flatten()
            .map(|dir| dir.join(logging::LOG_FILE))
    });
    if let Err(e) = logging::init(&directive, file.as_deref()) {
        print_warning(format_args!("cannot open log file: {e}"));
        let _ = logging::init(&directive, None);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
