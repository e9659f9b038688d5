// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve a hook key and run it against the payload on the hook stdin
//! channel.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use super::context::{HookContext, ENV_PROJECT_DIR};
use super::protocol::HookPayload;
use super::registry::HookRegistry;
use super::stdin::read_hook_input;
use super::{Hook, HookError};
use crate::prefs::Preferences;

/// Result of resolving a hook key.
pub enum Resolved {
    Enabled(Arc<dyn Hook>),
    /// Turned off in preferences; runs as a no-op
    Disabled,
}

/// What a run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Ran,
    Disabled,
}

/// Per-run options supplied by the entry point.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Pass job stdout through to this process's stdout
    pub forward_output: bool,
    /// Extra variables projected to job processes
    pub env: Vec<(String, String)>,
}

#[derive(Clone, Debug)]
pub struct HookRunner {
    registry: HookRegistry,
    prefs: Preferences,
    project_dir: Option<PathBuf>,
}

impl HookRunner {
    pub fn new(registry: HookRegistry, prefs: Preferences) -> Self {
        Self {
            registry,
            prefs,
            project_dir: None,
        }
    }

    /// Project root exposed to jobs and used when the payload has no `cwd`.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    pub fn resolve(&self, key: &str) -> Result<Resolved, HookError> {
        let hook = self
            .registry
            .get(key)
            .ok_or_else(|| HookError::UnknownHook(key.to_string()))?;
        if self.prefs.is_disabled(key) {
            tracing::info!(key, "hook disabled in preferences");
            return Ok(Resolved::Disabled);
        }
        Ok(Resolved::Enabled(hook))
    }

    /// Run a hook for a Claude Code event, forwarding job output.
    pub async fn run(&self, key: &str) -> Result<RunOutcome, HookError> {
        self.run_with(
            key,
            RunOptions {
                forward_output: true,
                ..RunOptions::default()
            },
        )
        .await
    }

    /// Run a hook against the payload read from the hook stdin channel.
    ///
    /// Empty input is an event-less payload.
    pub async fn run_with(&self, key: &str, options: RunOptions) -> Result<RunOutcome, HookError> {
        let hook = match self.resolve(key)? {
            Resolved::Enabled(hook) => hook,
            Resolved::Disabled => return Ok(RunOutcome::Disabled),
        };

        let input = read_hook_input().await?;
        let payload = HookPayload::parse(&input).map_err(|e| HookError::InvalidPayload(e.to_string()))?;

        let fallback_cwd = match &self.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let mut ctx = HookContext::new(key, payload, fallback_cwd)
            .with_forwarded_output(options.forward_output);
        if let Some(dir) = &self.project_dir {
            ctx = ctx.with_env(ENV_PROJECT_DIR, dir.display().to_string());
        }
        for (name, value) in options.env {
            ctx = ctx.with_env(name, value);
        }

        tracing::debug!(key, event = %ctx.event, cwd = %ctx.cwd.display(), "running hook");
        execute(hook, ctx).await?;
        Ok(RunOutcome::Ran)
    }
}

/// Run a hook on its own task so a panic becomes an error.
pub async fn execute(hook: Arc<dyn Hook>, ctx: HookContext) -> Result<(), HookError> {
    let key = ctx.key.clone();
    let task = tokio::spawn(async move { hook.run(&ctx).await });
    match task.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => {
            let message = panic_message(e.into_panic());
            tracing::error!(key = %key, message = %message, "hook panicked");
            Err(HookError::Panicked { key, message })
        }
        Err(e) => Err(HookError::Panicked {
            key,
            message: e.to_string(),
        }),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
