// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `hookwright cursor <key>`: the Cursor side of the bridge.
//!
//! Cursor reads stdout as the hook decision, so this command prints exactly
//! one JSON response on every path, including setup failures.

use std::path::Path;

use super::Context;
use crate::bridge::{Bridge, BridgeError, BridgeExit, BridgeOutcome, CursorRequest};
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::hooks::{read_hook_input, HookRegistry, HookRunner};
use crate::prefs::{PrefsError, Preferences};

pub async fn run(global: &GlobalArgs, prefs: Result<Preferences, PrefsError>, key: &str) -> i32 {
    let raw = match read_hook_input().await {
        Ok(raw) => raw,
        Err(e) => {
            return respond(BridgeOutcome::deny(
                "",
                format!("cannot read Cursor request: {e}"),
                BridgeExit::MalformedInput,
            ))
        }
    };

    let request = match CursorRequest::parse(&raw) {
        Ok(request) => request,
        Err(e) => {
            let err = BridgeError::from(e);
            tracing::warn!(key, error = %err, "rejecting malformed request");
            return respond(BridgeOutcome::deny("", err.to_string(), BridgeExit::MalformedInput));
        }
    };

    let root_hint = request.working_dir().map(Path::new);
    let outcome = match runner(global, prefs, root_hint) {
        Ok(runner) => Bridge::new(runner).handle(&raw, key).await,
        Err(e) => {
            tracing::warn!(key, error = %e, "cannot prepare hook");
            BridgeOutcome::deny(&request.hook_event_name, e.to_string(), BridgeExit::Deny)
        }
    };
    respond(outcome)
}

fn runner(
    global: &GlobalArgs,
    prefs: Result<Preferences, PrefsError>,
    root_hint: Option<&Path>,
) -> Result<HookRunner> {
    let ctx = Context::resolve(global, prefs?, root_hint)?;
    let config = ctx.load_config()?;
    Ok(
        HookRunner::new(HookRegistry::from_config(&config), ctx.prefs.clone())
            .with_project_dir(&ctx.project_root),
    )
}

fn respond(outcome: BridgeOutcome) -> i32 {
    println!("{}", outcome.response.to_json());
    outcome.exit.code()
}
