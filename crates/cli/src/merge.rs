// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Insert-or-update and removal of hook commands in a settings document.
//!
//! Two commands are the same hook when their logical identities match, i.e.
//! after trailing logging flags are stripped. Adding a hook that already
//! exists either leaves the document untouched (identical) or updates the
//! existing command in place (anything differs).

use std::fmt;

use thiserror::Error;

use crate::events;
use crate::invocation::{self, Ownership};
use crate::settings::{HookCommand, MatcherEntry, SettingsDocument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("unknown event '{0}' (valid events: {names})", names = events::valid_event_names().join(", "))]
    UnknownEvent(String),

    #[error("hook command is empty")]
    EmptyCommand,
}

/// Outcome of [`add_entry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeResult {
    /// A new hook command was inserted.
    Added { event: String, matcher: String },
    /// An identical command was already present; nothing changed.
    Duplicate { event: String, matcher: String },
    /// A command with the same logical identity was updated.
    Replaced { event: String, changes: Vec<String> },
}

impl MergeResult {
    /// Whether the document was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Duplicate { .. })
    }

    /// Human-readable description of what happened.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MergeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { event, matcher } => {
                write!(f, "added {event} hook{}", matcher_suffix(matcher))
            }
            Self::Duplicate { event, matcher } => write!(
                f,
                "identical {event} hook{} already present, no change",
                matcher_suffix(matcher)
            ),
            Self::Replaced { event, changes } => {
                write!(f, "replaced {event} hook ({})", changes.join(", "))
            }
        }
    }
}

fn matcher_suffix(matcher: &str) -> String {
    if matcher.is_empty() {
        String::new()
    } else {
        format!(" for matcher '{matcher}'")
    }
}

fn describe_timeout(timeout: Option<u64>) -> String {
    timeout.map_or_else(|| "none".to_string(), |t| format!("{t}s"))
}

/// An installed hook command with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstalledEntry {
    pub event: String,
    pub matcher: String,
    pub command: String,
    pub timeout: Option<u64>,
}

/// Insert a hook command, or update the existing one with the same logical
/// identity.
pub fn add_entry(
    doc: &mut SettingsDocument,
    event: &str,
    matcher: &str,
    invocation: &str,
    timeout: Option<u64>,
) -> Result<MergeResult, MergeError> {
    let canonical = events::canonicalize(event);
    if !events::is_valid_event(canonical) {
        return Err(MergeError::UnknownEvent(event.to_string()));
    }
    if invocation.trim().is_empty() {
        return Err(MergeError::EmptyCommand);
    }

    let identity = invocation::logical_identity(invocation);
    let found: Vec<(usize, usize)> = doc
        .hooks
        .get(canonical)
        .map(|entries| find_identity(entries, &identity))
        .unwrap_or_default();

    let Some(&(first_entry, first_hook)) = found.first() else {
        let entries = doc.hooks.entry(canonical);
        let hook = HookCommand::new(invocation, timeout);
        match entries.iter_mut().find(|e| e.matcher == matcher) {
            Some(existing) => existing.hooks.push(hook),
            None => entries.push(MatcherEntry::new(matcher, vec![hook])),
        }
        tracing::info!(event = canonical, matcher, command = invocation, "added hook");
        return Ok(MergeResult::Added {
            event: canonical.to_string(),
            matcher: matcher.to_string(),
        });
    };

    let entries = doc.hooks.entry(canonical);
    let mut changes = Vec::new();
    {
        let entry = &entries[first_entry];
        let hook = &entry.hooks[first_hook];
        if entry.matcher != matcher {
            changes.push(format!("matcher '{}' -> '{matcher}'", entry.matcher));
        }
        if hook.timeout != timeout {
            changes.push(format!(
                "timeout {} -> {}",
                describe_timeout(hook.timeout),
                describe_timeout(timeout)
            ));
        }
        if hook.command != invocation {
            changes.push(format!("command '{}' -> '{invocation}'", hook.command));
        }
    }
    let legacy = found.len() - 1;
    if legacy > 0 {
        changes.push(format!("removed {legacy} legacy duplicate(s)"));
    }

    if changes.is_empty() {
        tracing::debug!(event = canonical, command = invocation, "hook already present");
        return Ok(MergeResult::Duplicate {
            event: canonical.to_string(),
            matcher: matcher.to_string(),
        });
    }

    // Later positions first so earlier indices stay valid.
    let mut emptied = Vec::new();
    for &(entry_index, hook_index) in found[1..].iter().rev() {
        let entry = &mut entries[entry_index];
        entry.hooks.remove(hook_index);
        if entry.hooks.is_empty() && !emptied.contains(&entry_index) {
            emptied.push(entry_index);
        }
    }

    let hook = &mut entries[first_entry].hooks[first_hook];
    hook.command = invocation.to_string();
    hook.timeout = timeout;

    if entries[first_entry].matcher != matcher {
        let target = entries
            .iter()
            .position(|e| e.matcher == matcher && !e.hooks.is_empty());
        match target {
            Some(target) => {
                let hook = entries[first_entry].hooks.remove(first_hook);
                entries[target].hooks.push(hook);
                if entries[first_entry].hooks.is_empty() {
                    emptied.push(first_entry);
                }
            }
            None if entries[first_entry].hooks.len() == 1 => {
                entries[first_entry].matcher = matcher.to_string();
            }
            None => {
                let hook = entries[first_entry].hooks.remove(first_hook);
                entries.insert(first_entry + 1, MatcherEntry::new(matcher, vec![hook]));
                // Entries after the insertion point shifted by one.
                for index in &mut emptied {
                    if *index > first_entry {
                        *index += 1;
                    }
                }
            }
        }
    }

    emptied.sort_unstable();
    emptied.dedup();
    for index in emptied.into_iter().rev() {
        entries.remove(index);
    }

    tracing::info!(event = canonical, command = invocation, changes = ?changes, "replaced hook");
    Ok(MergeResult::Replaced {
        event: canonical.to_string(),
        changes,
    })
}

fn find_identity(entries: &[MatcherEntry], identity: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    for (entry_index, entry) in entries.iter().enumerate() {
        for (hook_index, hook) in entry.hooks.iter().enumerate() {
            if invocation::logical_identity(&hook.command) == identity {
                found.push((entry_index, hook_index));
            }
        }
    }
    found
}

/// Remove hook commands matching `predicate`, optionally within one event.
///
/// Matcher entries and events emptied by the removal are dropped; entries
/// that were already empty are left alone. Returns the removed commands.
pub fn take_matching<F>(
    doc: &mut SettingsDocument,
    event_filter: Option<&str>,
    mut predicate: F,
) -> Vec<InstalledEntry>
where
    F: FnMut(&str, &HookCommand) -> bool,
{
    let filter = event_filter.map(events::canonicalize);
    let mut removed = Vec::new();
    let mut emptied_events = Vec::new();

    for (event, entries) in doc.hooks.iter_mut() {
        if filter.is_some_and(|f| events::canonicalize(event) != f) {
            continue;
        }
        let had_entries = !entries.is_empty();
        entries.retain_mut(|entry| {
            let had_hooks = !entry.hooks.is_empty();
            let matcher = entry.matcher.clone();
            entry.hooks.retain(|hook| {
                if predicate(event, hook) {
                    removed.push(InstalledEntry {
                        event: event.to_string(),
                        matcher: matcher.clone(),
                        command: hook.command.clone(),
                        timeout: hook.timeout,
                    });
                    false
                } else {
                    true
                }
            });
            !(had_hooks && entry.hooks.is_empty())
        });
        if had_entries && entries.is_empty() {
            emptied_events.push(event.to_string());
        }
    }

    for event in emptied_events {
        doc.hooks.remove(&event);
    }
    removed
}

/// Remove hook commands matching `predicate`. Returns how many were removed.
pub fn remove_matching<F>(doc: &mut SettingsDocument, event_filter: Option<&str>, predicate: F) -> usize
where
    F: FnMut(&str, &HookCommand) -> bool,
{
    take_matching(doc, event_filter, predicate).len()
}

/// Remove a command by exact invocation or logical identity.
pub fn remove_entry(doc: &mut SettingsDocument, invocation: &str) -> usize {
    let identity = invocation::logical_identity(invocation);
    let count = remove_matching(doc, None, |_, hook| {
        hook.command == invocation || invocation::logical_identity(&hook.command) == identity
    });
    tracing::info!(command = invocation, count, "removed hook");
    count
}

/// Remove every owned command whose invocation encodes `config:<group>:`.
pub fn remove_by_group(
    doc: &mut SettingsDocument,
    group: &str,
    event_filter: Option<&str>,
    ownership: &Ownership,
) -> usize {
    let count = remove_matching(doc, event_filter, |_, hook| {
        ownership.group_of(&hook.command).as_deref() == Some(group)
    });
    tracing::info!(group, event = ?event_filter, count, "removed group hooks");
    count
}

/// Remove every command the predicate claims, typically those owned by this tool.
pub fn remove_all<F>(doc: &mut SettingsDocument, owned: F) -> usize
where
    F: Fn(&str) -> bool,
{
    let count = remove_matching(doc, None, |_, hook| owned(&hook.command));
    tracing::info!(count, "removed owned hooks");
    count
}

/// Installed commands the predicate claims, in document order.
pub fn owned_entries<F>(doc: &SettingsDocument, owned: F) -> Vec<InstalledEntry>
where
    F: Fn(&str) -> bool,
{
    doc.hooks
        .iter()
        .flat_map(|(event, entries)| {
            entries.iter().flat_map(move |entry| {
                entry.hooks.iter().map(move |hook| (event, entry, hook))
            })
        })
        .filter(|(_, _, hook)| owned(&hook.command))
        .map(|(event, entry, hook)| InstalledEntry {
            event: event.to_string(),
            matcher: entry.matcher.clone(),
            command: hook.command.clone(),
            timeout: hook.timeout,
        })
        .collect()
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
