// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::{json, Value};

use super::Context;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::merge::{owned_entries, InstalledEntry};
use crate::settings::io::to_pretty_json;

pub fn run(ctx: &Context, args: &ListArgs) -> Result<i32> {
    let scope = ctx.scope(args.scope);
    let store = ctx.settings_store(scope)?;
    let doc = store.load(scope)?;
    let ownership = ctx.ownership();
    let entries = owned_entries(&doc, |command| args.all || ownership.owns(command));

    if args.json {
        let value: Vec<Value> = entries.iter().map(entry_json).collect();
        print!("{}", to_pretty_json(&value).map_err(std::io::Error::other)?);
    } else if entries.is_empty() {
        println!("no hooks installed in {}", store.path(scope).display());
    } else {
        print!("{}", format_entries(&entries));
    }
    Ok(0)
}

fn entry_json(entry: &InstalledEntry) -> Value {
    json!({
        "event": entry.event,
        "matcher": entry.matcher,
        "command": entry.command,
        "timeout": entry.timeout,
    })
}

/// Entries grouped under their event heading, in document order.
fn format_entries(entries: &[InstalledEntry]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.event.as_str()) {
            out.push_str(&entry.event);
            out.push('\n');
            current = Some(&entry.event);
        }
        out.push_str("  ");
        if !entry.matcher.is_empty() {
            out.push_str(&format!("[{}] ", entry.matcher));
        }
        out.push_str(&entry.command);
        if let Some(timeout) = entry.timeout {
            out.push_str(&format!(" (timeout {timeout}s)"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
