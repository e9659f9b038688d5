// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor hook bridge.
//!
//! Cursor invokes `hookwright cursor <hook-key>` with a native JSON request on
//! stdin and expects exactly one JSON response on stdout. The bridge
//! translates the request into the canonical payload, runs the hook through
//! the same [`HookRunner`] path as Claude Code, and maps the outcome back:
//!
//! - malformed request: deny, exit 3, no hook runs
//! - unknown hook or untranslatable event: deny, exit 2
//! - disabled hook: allow, nothing runs
//! - hook failure or panic: deny, exit 2
//! - success: allow, exit 0

pub mod protocol;
pub mod translate;

pub use protocol::{BridgeExit, CursorRequest, CursorResponse, Permission};
pub use translate::translate;

use thiserror::Error;

use crate::events::cursor;
use crate::hooks::context::{ENV_CURSOR_CONVERSATION_ID, ENV_CURSOR_GENERATION_ID};
use crate::hooks::{HookRunner, Resolved, RunOptions, RunOutcome, StdinRedirect};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed Cursor request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported Cursor event '{0}'")]
    UnsupportedEvent(String),

    #[error("Cursor event '{event}' is missing '{field}'")]
    MissingField { event: String, field: &'static str },

    #[error("invalid MCP tool input: {0}")]
    InvalidToolInput(String),
}

/// Response and exit code for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeOutcome {
    pub response: CursorResponse,
    pub exit: BridgeExit,
}

impl BridgeOutcome {
    pub(crate) fn allow(native: &str) -> Self {
        Self {
            response: shape(CursorResponse::allow(), native),
            exit: BridgeExit::Allow,
        }
    }

    pub(crate) fn deny(native: &str, message: impl Into<String>, exit: BridgeExit) -> Self {
        Self {
            response: shape(CursorResponse::deny(message), native),
            exit,
        }
    }
}

fn shape(response: CursorResponse, native: &str) -> CursorResponse {
    if native == cursor::BEFORE_SUBMIT_PROMPT {
        response.with_continue()
    } else {
        response
    }
}

#[derive(Debug)]
pub struct Bridge {
    runner: HookRunner,
}

impl Bridge {
    pub fn new(runner: HookRunner) -> Self {
        Self { runner }
    }

    /// Handle one raw Cursor request for `key`.
    pub async fn handle(&self, raw: &str, key: &str) -> BridgeOutcome {
        let request = match CursorRequest::parse(raw) {
            Ok(request) => request,
            Err(e) => {
                let err = BridgeError::from(e);
                tracing::warn!(key, error = %err, "rejecting malformed request");
                return BridgeOutcome::deny("", err.to_string(), BridgeExit::MalformedInput);
            }
        };
        let native = request.hook_event_name.as_str();

        match self.runner.resolve(key) {
            Ok(Resolved::Enabled(_)) => {}
            Ok(Resolved::Disabled) => return BridgeOutcome::allow(native),
            Err(e) => return BridgeOutcome::deny(native, e.to_string(), BridgeExit::Deny),
        }

        let payload = match translate(&request) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key, native, error = %e, "cannot translate request");
                return BridgeOutcome::deny(native, e.to_string(), BridgeExit::Deny);
            }
        };
        let json = match payload.to_json() {
            Ok(json) => json,
            Err(e) => return BridgeOutcome::deny(native, e.to_string(), BridgeExit::Deny),
        };

        let mut env = Vec::new();
        if let Some(id) = &request.conversation_id {
            env.push((ENV_CURSOR_CONVERSATION_ID.to_string(), id.clone()));
        }
        if let Some(id) = &request.generation_id {
            env.push((ENV_CURSOR_GENERATION_ID.to_string(), id.clone()));
        }
        let options = RunOptions {
            forward_output: false,
            env,
        };

        let result = {
            let _redirect = StdinRedirect::install(json);
            self.runner.run_with(key, options).await
        };

        match result {
            Ok(RunOutcome::Ran) => {
                tracing::info!(key, native, "hook allowed");
                BridgeOutcome::allow(native)
            }
            Ok(RunOutcome::Disabled) => BridgeOutcome::allow(native),
            Err(e) => {
                tracing::info!(key, native, error = %e, "hook denied");
                BridgeOutcome::deny(native, e.to_string(), BridgeExit::Deny)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
