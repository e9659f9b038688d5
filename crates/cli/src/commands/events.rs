// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;
use crate::events::{cursor_events_for, EventInfo, EVENTS};

pub fn run() -> Result<i32> {
    print!("{}", format_table(EVENTS));
    Ok(0)
}

fn format_table(events: &[EventInfo]) -> String {
    let width = events.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for info in events {
        let mut notes = Vec::new();
        if !info.supported {
            notes.push("unsupported".to_string());
        }
        let cursor = cursor_events_for(info.name);
        if !cursor.is_empty() {
            notes.push(format!("cursor: {}", cursor.join(", ")));
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join("; "))
        };
        out.push_str(&format!("{:<width$}  {}{notes}\n", info.name, info.description));
    }
    out
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
