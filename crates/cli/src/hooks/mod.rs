// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook contract, registry, and execution.
//!
//! Every runnable hook implements [`Hook`] and is registered under a hook
//! key such as `config:lint:eslint`. Both the Claude Code entry point
//! (`run`) and the Cursor bridge resolve keys through the same registry and
//! execute hooks through [`HookRunner`].

pub mod context;
pub mod executor;
pub mod protocol;
pub mod registry;
pub mod runner;
pub mod stdin;

pub use context::HookContext;
pub use executor::ConfigJobHook;
pub use protocol::HookPayload;
pub use registry::HookRegistry;
pub use runner::{HookRunner, Resolved, RunOptions, RunOutcome};
pub use stdin::{read_hook_input, StdinRedirect};

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Future returned by [`Hook::run`].
pub type HookFuture<'a> = Pin<Box<dyn Future<Output = Result<(), HookError>> + Send + 'a>>;

/// A runnable hook.
pub trait Hook: Send + Sync {
    /// Run the hook for one event.
    fn run<'a>(&'a self, ctx: &'a HookContext) -> HookFuture<'a>;

    /// One-line description for listings.
    fn description(&self) -> String;
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("unknown hook '{0}'")]
    UnknownHook(String),

    #[error("hook '{key}' does not handle event '{event}'")]
    UnhandledEvent { key: String, event: String },

    #[error("invalid hook payload: {0}")]
    InvalidPayload(String),

    #[error("invalid job '{key}': {message}")]
    InvalidJob { key: String, message: String },

    #[error("failed to spawn job '{key}': {source}")]
    Spawn {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("hook I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", job_failure(.key, .code, .message))]
    JobFailed {
        key: String,
        code: Option<i32>,
        message: String,
    },

    #[error("hook '{key}' panicked: {message}")]
    Panicked { key: String, message: String },
}

fn job_failure(key: &str, code: &Option<i32>, message: &str) -> String {
    let status = code.map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"));
    if message.is_empty() {
        format!("job '{key}' failed with {status}")
    } else {
        format!("job '{key}' failed with {status}: {message}")
    }
}
