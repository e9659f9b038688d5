// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable per-invocation hook context.
//!
//! Values a job needs are projected once into a context and passed to the
//! job process as environment variables, never written to this process's
//! own environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::protocol::HookPayload;
use crate::config::Facts;

/// `HOOKWRIGHT_EVENT`: canonical event name.
pub const ENV_EVENT: &str = "HOOKWRIGHT_EVENT";
/// `HOOKWRIGHT_TOOL_NAME`: tool being invoked.
pub const ENV_TOOL_NAME: &str = "HOOKWRIGHT_TOOL_NAME";
/// `HOOKWRIGHT_TOOL_INPUT`: tool arguments as compact JSON.
pub const ENV_TOOL_INPUT: &str = "HOOKWRIGHT_TOOL_INPUT";
/// `HOOKWRIGHT_FILE_PATH`: first changed file.
pub const ENV_FILE_PATH: &str = "HOOKWRIGHT_FILE_PATH";
/// `HOOKWRIGHT_FILES`: changed files, newline separated.
pub const ENV_FILES: &str = "HOOKWRIGHT_FILES";
/// `HOOKWRIGHT_CWD`: working directory of the event.
pub const ENV_CWD: &str = "HOOKWRIGHT_CWD";
/// `HOOKWRIGHT_PROMPT`: submitted prompt.
pub const ENV_PROMPT: &str = "HOOKWRIGHT_PROMPT";
/// `HOOKWRIGHT_SESSION_ID`: session or conversation id.
pub const ENV_SESSION_ID: &str = "HOOKWRIGHT_SESSION_ID";
/// `CLAUDE_PROJECT_DIR`: project root, as Claude Code exposes it to hooks.
pub const ENV_PROJECT_DIR: &str = crate::env::CLAUDE_PROJECT_DIR;
/// `CURSOR_CONVERSATION_ID`: Cursor conversation id.
pub const ENV_CURSOR_CONVERSATION_ID: &str = "CURSOR_CONVERSATION_ID";
/// `CURSOR_GENERATION_ID`: Cursor generation id.
pub const ENV_CURSOR_GENERATION_ID: &str = "CURSOR_GENERATION_ID";

/// Largest value projected into a job's environment.
///
/// Linux rejects any single environment string over 128 KiB at exec time.
/// Larger values are dropped; the full payload still arrives on stdin.
pub const MAX_ENV_VALUE: usize = 64 * 1024;

/// Everything a hook sees for one event.
#[derive(Clone, Debug)]
pub struct HookContext {
    /// Hook key being run, e.g. `config:lint:eslint`
    pub key: String,
    /// Canonical event name
    pub event: String,
    /// Canonical payload, forwarded to the job on stdin
    pub payload: HookPayload,
    /// Files the event touches
    pub files: Vec<String>,
    /// Working directory for job processes
    pub cwd: PathBuf,
    /// Whether job stdout is passed through to this process's stdout
    pub forward_output: bool,
    env: BTreeMap<String, String>,
}

impl HookContext {
    /// Build a context from a canonical payload.
    ///
    /// `cwd` falls back to `fallback_cwd` when the payload carries none.
    pub fn new(key: impl Into<String>, payload: HookPayload, fallback_cwd: PathBuf) -> Self {
        let event = crate::events::canonicalize(&payload.hook_event_name).to_string();
        let cwd = payload
            .cwd
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(PathBuf::from)
            .unwrap_or(fallback_cwd);
        let files = payload.changed_files();

        let mut ctx = Self {
            key: key.into(),
            event,
            payload,
            files,
            cwd,
            forward_output: false,
            env: BTreeMap::new(),
        };
        ctx.project_env();
        ctx
    }

    /// Add or override a projected variable.
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Pass job stdout through to this process's stdout.
    pub fn with_forwarded_output(mut self, forward: bool) -> Self {
        self.forward_output = forward;
        self
    }

    /// Variables passed to job processes.
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    pub fn tool_name(&self) -> &str {
        self.payload.tool_name()
    }

    pub fn prompt(&self) -> &str {
        self.payload.prompt()
    }

    /// First changed file, or empty.
    pub fn file(&self) -> &str {
        self.files.first().map(String::as_str).unwrap_or_default()
    }

    /// Facts for evaluating `only` expressions.
    pub fn facts(&self) -> Facts<'_> {
        Facts {
            tool: self.tool_name(),
            event: &self.event,
            files: &self.files,
            cwd: self.cwd.to_str().unwrap_or_default(),
            prompt: self.prompt(),
        }
    }

    fn project_env(&mut self) {
        let payload = &self.payload;
        let mut vars = vec![
            (ENV_EVENT, self.event.clone()),
            (ENV_CWD, self.cwd.display().to_string()),
        ];
        if let Some(tool) = &payload.tool_name {
            vars.push((ENV_TOOL_NAME, tool.clone()));
        }
        if let Some(input) = &payload.tool_input {
            vars.push((ENV_TOOL_INPUT, input.to_string()));
        }
        if let Some(file) = self.files.first() {
            vars.push((ENV_FILE_PATH, file.clone()));
            vars.push((ENV_FILES, self.files.join("\n")));
        }
        if let Some(prompt) = &payload.prompt {
            vars.push((ENV_PROMPT, prompt.clone()));
        }
        if let Some(session) = &payload.session_id {
            vars.push((ENV_SESSION_ID, session.clone()));
        }

        for (name, value) in vars {
            if value.len() > MAX_ENV_VALUE {
                tracing::debug!(
                    key = %self.key,
                    name,
                    len = value.len(),
                    "value too large for the environment, not projected"
                );
                continue;
            }
            self.env.insert(name.to_string(), value);
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
