// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::error::Result;
use crate::hooks::{HookRegistry, HookRunner, RunOutcome};

/// Run a hook for Claude Code. A failing job surfaces as a blocking error.
pub async fn run(ctx: &Context, key: &str) -> Result<i32> {
    let config = ctx.load_config()?;
    let runner = HookRunner::new(HookRegistry::from_config(&config), ctx.prefs.clone())
        .with_project_dir(&ctx.project_root);

    match runner.run(key).await? {
        RunOutcome::Ran => tracing::debug!(key, "hook succeeded"),
        RunOutcome::Disabled => tracing::debug!(key, "hook skipped"),
    }
    Ok(0)
}
