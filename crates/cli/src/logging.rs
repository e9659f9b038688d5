// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging.
//!
//! Logs go to stderr, or to a file with `--log-file`; stdout carries command
//! results and hook protocol responses only. The filter is the first of
//! `HOOKWRIGHT_LOG`, `--log-level`, and the `log_level` preference, else
//! `warn`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// File name for `--log` inside the config directory.
pub const LOG_FILE: &str = "hookwright.log";

/// Pick the filter directive by precedence.
pub fn directive(env: Option<String>, flag: Option<&str>, preference: Option<&str>) -> String {
    env.or_else(|| flag.map(str::to_string))
        .or_else(|| preference.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        crate::output::print_warning(format_args!("invalid log filter '{directive}': {e}"));
        EnvFilter::new(DEFAULT_LEVEL)
    })
}

/// Install the global subscriber.
///
/// A second call is a no-op.
pub fn init(directive: &str, file: Option<&Path>) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .with_target(false);

    let installed = match file {
        Some(path) => {
            crate::settings::io::ensure_parent_exists(path)?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
