// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::config::ConfigError;
use crate::error::Result;
use crate::output::print_warning;

pub fn run(ctx: &Context) -> Result<i32> {
    let (loader, config) = ctx.load_unchecked()?;

    for location in config.unnamed_jobs() {
        print_warning(format_args!("{location}: jobs without a name are never installed"));
    }
    let issues = config.issues();
    if !issues.is_empty() {
        return Err(ConfigError::Invalid(issues).into());
    }

    let jobs: usize = config
        .groups
        .values()
        .flat_map(|g| g.events.values())
        .map(|spec| spec.named_jobs().count())
        .sum();
    for path in loader.existing_files() {
        println!("loaded {}", path.display());
    }
    println!("configuration OK: {} group(s), {jobs} job(s)", config.groups.len());
    Ok(0)
}
