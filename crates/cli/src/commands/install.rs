// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{print_report, Context};
use crate::cli::{InstallArgs, Platform, SyncArgs};
use crate::cursor::CursorHooksFile;
use crate::error::{Error, Result};
use crate::events::{canonicalize, cursor_events_for, is_cursor_event, is_valid_event};
use crate::merge::{add_entry, MergeError, MergeResult};
use crate::sync::{ActionKind, SyncReport};

pub fn run(ctx: &Context, args: &InstallArgs) -> Result<i32> {
    let scope = ctx.scope(args.scope);
    match args.platform {
        Platform::Claude => {
            let store = ctx.settings_store(scope)?;
            let mut doc = store.load(scope)?;
            let canonical = canonicalize(&args.event);
            let matcher = match &args.matcher {
                Some(m) => m.clone(),
                None => ctx
                    .sync_options(&SyncArgs::default())?
                    .matcher_for(canonical)
                    .to_string(),
            };

            let result = add_entry(&mut doc, &args.event, &matcher, &args.command, args.timeout)?;
            println!("{result}");
            if result.is_change() {
                store.save(scope, &doc)?;
            }
            print_report(&report_for(&result, &args.command), false);
        }
        Platform::Cursor => {
            let natives = cursor_targets(&args.event)?;
            let path = ctx.cursor_path(scope)?;
            let mut file = CursorHooksFile::load(&path)?;
            let mut report = SyncReport::default();
            for native in natives {
                if file.add(native, &args.command) {
                    report.record(ActionKind::Add, native, &args.command, None);
                } else {
                    println!("identical {native} hook already present, no change");
                }
            }
            if !report.is_empty() {
                file.save(&path)?;
            }
            print_report(&report, false);
        }
    }
    Ok(0)
}

/// Native Cursor events a command for `event` is registered under.
fn cursor_targets(event: &str) -> Result<Vec<&'static str>> {
    if is_cursor_event(event) {
        return Ok(cursor_events_for(canonicalize(event))
            .into_iter()
            .filter(|native| *native == event)
            .collect());
    }
    let canonical = canonicalize(event);
    if !is_valid_event(canonical) {
        return Err(MergeError::UnknownEvent(event.to_string()).into());
    }
    let natives = cursor_events_for(canonical);
    if natives.is_empty() {
        return Err(Error::Usage(format!("event '{canonical}' has no Cursor equivalent")));
    }
    Ok(natives)
}

fn report_for(result: &MergeResult, command: &str) -> SyncReport {
    let mut report = SyncReport::default();
    match result {
        MergeResult::Added { event, .. } => report.record(ActionKind::Add, event, command, None),
        MergeResult::Replaced { event, changes } => {
            report.record(ActionKind::Replace, event, command, Some(changes.join(", ")))
        }
        MergeResult::Duplicate { .. } => {}
    }
    report
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
