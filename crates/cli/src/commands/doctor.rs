// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Health checks over the configuration and installed hooks.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::Context;
use crate::cli::DoctorArgs;
use crate::config::Configuration;
use crate::cursor::CursorHooksFile;
use crate::env;
use crate::error::{Error, Result};
use crate::hooks::HookRegistry;
use crate::invocation::tokenize;
use crate::merge::owned_entries;
use crate::output::print_check;
use crate::prefs::PrefsError;
use crate::settings::SettingsDocument;
use crate::sync::stale_groups;

/// Outcome of one check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Check {
    pub ok: bool,
    pub message: String,
}

impl Check {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

pub fn run(ctx: &Context, args: &DoctorArgs, prefs_error: Option<&PrefsError>) -> Result<i32> {
    let scope = ctx.scope(args.scope);
    let mut checks = Vec::new();

    checks.push(match prefs_error {
        None => Check::pass("preferences readable"),
        Some(e) => Check::fail(e.to_string()),
    });

    let config = match ctx.load_config() {
        Ok(config) => {
            checks.push(Check::pass(format!(
                "configuration valid ({} group(s))",
                config.groups.len()
            )));
            Some(config)
        }
        Err(e) => {
            checks.push(Check::fail(e.to_string()));
            None
        }
    };

    let store = ctx.settings_store(scope)?;
    let settings_path = store.path(scope);
    match store.load(scope) {
        Ok(doc) => {
            checks.push(Check::pass(format!(
                "{} parses ({} hook(s))",
                settings_path.display(),
                doc.hooks.hook_count()
            )));
            checks.extend(installed_checks(ctx, &doc, config.as_ref()));
        }
        Err(e) => checks.push(Check::fail(e.to_string())),
    }

    let cursor_path = ctx.cursor_path(scope)?;
    if cursor_path.is_file() {
        checks.push(match CursorHooksFile::load(&cursor_path) {
            Ok(file) => Check::pass(format!(
                "{} parses ({} hook(s))",
                cursor_path.display(),
                file.hooks.hook_count()
            )),
            Err(e) => Check::fail(e.to_string()),
        });
    }

    for check in &checks {
        print_check(check.ok, &check.message);
    }
    let failed = checks.iter().filter(|c| !c.ok).count();
    if failed > 0 {
        return Err(Error::ChecksFailed(failed));
    }
    Ok(0)
}

/// Checks over the hooks this tool installed in `doc`.
pub(crate) fn installed_checks(
    ctx: &Context,
    doc: &SettingsDocument,
    config: Option<&Configuration>,
) -> Vec<Check> {
    let ownership = ctx.ownership();
    let entries = owned_entries(doc, |command| ownership.owns(command));
    let mut checks = Vec::new();

    let executables: BTreeSet<String> = entries
        .iter()
        .filter_map(|entry| tokenize(&entry.command).into_iter().next())
        .collect();
    for exe in &executables {
        if resolve_executable(exe, env::search_path().as_deref()).is_some() {
            checks.push(Check::pass(format!("executable {exe} found")));
        } else {
            checks.push(Check::fail(format!(
                "executable {exe} not found (run `hookwright sync` to reinstall)"
            )));
        }
    }

    let Some(config) = config else {
        return checks;
    };

    let stale = stale_groups(doc, config, &ownership);
    if stale.is_empty() {
        checks.push(Check::pass("no stale groups installed"));
    } else {
        checks.push(Check::fail(format!(
            "stale groups installed: {} (run `hookwright sync`)",
            stale.join(", ")
        )));
    }

    let registry = HookRegistry::from_config(config);
    let stale_groups: BTreeSet<&str> = stale.iter().map(String::as_str).collect();
    let missing: BTreeSet<String> = entries
        .iter()
        .filter_map(|entry| ownership.job_key(&entry.command))
        .filter(|key| !stale_groups.contains(key.group.as_str()))
        .map(|key| key.to_string())
        .filter(|key| registry.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        checks.push(Check::fail(format!(
            "installed hooks not declared in the configuration: {}",
            missing.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }
    checks
}

/// Locate an executable by path, or by name on the search path.
pub(crate) fn resolve_executable(exe: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let path = Path::new(exe);
    if path.components().count() > 1 || path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    let search_path = search_path?;
    std::env::split_paths(search_path)
        .map(|dir| dir.join(exe))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "doctor_tests.rs"]
mod tests;
