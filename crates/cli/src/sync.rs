// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Group sync: reconcile a settings document with the hook configuration.
//!
//! Runs in two phases:
//! 1. Stale cleanup removes hooks for groups (or group events) that the
//!    configuration no longer declares.
//! 2. Install current prunes each group's hooks for an event and re-adds
//!    every named job. A prune and re-add that reproduces the same sequence
//!    leaves the document untouched and counts as no change.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Configuration, Group};
use crate::events;
use crate::invocation::{self, InvocationError, JobKey, Ownership};
use crate::merge::{self, InstalledEntry, MergeError};
use crate::settings::SettingsDocument;

/// Matcher applied to most tool events.
pub const DEFAULT_MATCHER: &str = "*";

/// Matcher applied to `PostToolUse`, where only file edits are interesting.
pub const DEFAULT_POST_TOOL_MATCHER: &str = "Edit|MultiEdit|Write";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Parameters of one sync run.
#[derive(Clone, Debug)]
pub struct SyncOptions {
    /// Executable embedded in installed invocations
    pub executable: PathBuf,
    /// Only this group is cleaned up and installed
    pub group: Option<String>,
    /// Only this event (any spelling) is cleaned up and installed
    pub event: Option<String>,
    /// Matcher for events other than `PostToolUse`
    pub default_matcher: String,
    /// Matcher for `PostToolUse`
    pub post_tool_matcher: String,
    /// Timeout that wins over every job's own timeout
    pub timeout_override: Option<u64>,
    /// Timeout for jobs that declare none
    pub default_timeout: Option<u64>,
    /// Extra arguments appended to every invocation
    pub log_args: Vec<String>,
}

impl SyncOptions {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            group: None,
            event: None,
            default_matcher: DEFAULT_MATCHER.to_string(),
            post_tool_matcher: DEFAULT_POST_TOOL_MATCHER.to_string(),
            timeout_override: None,
            default_timeout: None,
            log_args: Vec::new(),
        }
    }

    /// Matcher used for a canonical event.
    pub fn matcher_for(&self, event: &str) -> &str {
        let tool_event = events::lookup(event).is_some_and(|e| e.tool_event);
        if event == events::POST_TOOL_USE {
            &self.post_tool_matcher
        } else if tool_event {
            &self.default_matcher
        } else {
            ""
        }
    }

    pub(crate) fn includes_group(&self, group: &str) -> bool {
        self.group.as_deref().is_none_or(|g| g == group)
    }

    pub(crate) fn includes_event(&self, canonical: &str) -> bool {
        self.event
            .as_deref()
            .is_none_or(|e| events::canonicalize(e) == canonical)
    }
}

/// What happened to one hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Remove,
    Replace,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        })
    }
}

/// One hook-level change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncAction {
    pub kind: ActionKind,
    pub event: String,
    pub command: String,
    pub detail: Option<String>,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.event, self.command)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Counts and actions of a sync run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
    pub replaced: usize,
    pub actions: Vec<SyncAction>,
}

impl SyncReport {
    /// Total number of hook-level changes.
    pub fn change_count(&self) -> usize {
        self.added + self.removed + self.replaced
    }

    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// One-line summary of the counts.
    pub fn summary(&self) -> String {
        format!(
            "{} added, {} removed, {} replaced",
            self.added, self.removed, self.replaced
        )
    }

    pub(crate) fn record(&mut self, kind: ActionKind, event: &str, command: &str, detail: Option<String>) {
        match kind {
            ActionKind::Add => self.added += 1,
            ActionKind::Remove => self.removed += 1,
            ActionKind::Replace => self.replaced += 1,
        }
        self.actions.push(SyncAction {
            kind,
            event: event.to_string(),
            command: command.to_string(),
            detail,
        });
    }

    fn record_removed(&mut self, removed: Vec<InstalledEntry>, detail: &str) {
        for entry in removed {
            self.record(
                ActionKind::Remove,
                &entry.event,
                &entry.command,
                Some(detail.to_string()),
            );
        }
    }
}

/// Reconcile `doc` with `config`.
///
/// The document is mutated in memory only; the caller decides whether to
/// save it (never, on a dry run).
pub fn sync(
    doc: &mut SettingsDocument,
    config: &Configuration,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let ownership = Ownership::for_executable(&options.executable);
    let mut report = SyncReport::default();
    remove_stale(doc, config, options, &ownership, &mut report);

    for (name, group) in &config.groups {
        if !options.includes_group(name) {
            continue;
        }
        install_group(doc, name, group, options, &ownership, &mut report)?;
    }

    tracing::info!(summary = %report.summary(), "sync complete");
    Ok(report)
}

/// Groups encoded in the document's owned invocations, in name order.
pub fn installed_groups(doc: &SettingsDocument, ownership: &Ownership) -> BTreeSet<String> {
    doc.hooks
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .flat_map(|entry| entry.hooks.iter())
        .filter_map(|hook| ownership.group_of(&hook.command))
        .collect()
}

/// Installed groups the configuration no longer declares.
pub fn stale_groups(
    doc: &SettingsDocument,
    config: &Configuration,
    ownership: &Ownership,
) -> Vec<String> {
    installed_groups(doc, ownership)
        .into_iter()
        .filter(|g| config.group(g).is_none())
        .collect()
}

fn remove_stale(
    doc: &mut SettingsDocument,
    config: &Configuration,
    options: &SyncOptions,
    ownership: &Ownership,
    report: &mut SyncReport,
) {
    for group in installed_groups(doc, ownership) {
        if !options.includes_group(&group) {
            continue;
        }
        let declared = config.group(&group).map(Group::canonical_events);
        let removed = merge::take_matching(doc, None, |event, hook| {
            let canonical = events::canonicalize(event);
            options.includes_event(canonical)
                && ownership.group_of(&hook.command).as_deref() == Some(group.as_str())
                && declared
                    .as_ref()
                    .is_none_or(|events| !events.iter().any(|e| e == canonical))
        });
        if removed.is_empty() {
            continue;
        }
        let detail = if declared.is_some() {
            "event no longer declared"
        } else {
            "stale group"
        };
        tracing::info!(group = %group, count = removed.len(), detail, "removed stale hooks");
        report.record_removed(removed, detail);
    }
}

/// One installed hook of a group, as compared across a prune and re-add.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Installed {
    key: Option<JobKey>,
    matcher: String,
    command: String,
    timeout: Option<u64>,
}

fn snapshot(doc: &SettingsDocument, ownership: &Ownership, group: &str, event: &str) -> Vec<Installed> {
    doc.hooks
        .get(event)
        .unwrap_or_default()
        .iter()
        .flat_map(|entry| entry.hooks.iter().map(move |hook| (entry, hook)))
        .filter(|(_, hook)| ownership.group_of(&hook.command).as_deref() == Some(group))
        .map(|(entry, hook)| Installed {
            key: ownership.job_key(&hook.command),
            matcher: entry.matcher.clone(),
            command: hook.command.clone(),
            timeout: hook.timeout,
        })
        .collect()
}

fn install_group(
    doc: &mut SettingsDocument,
    name: &str,
    group: &Group,
    options: &SyncOptions,
    ownership: &Ownership,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    for canonical in group.canonical_events() {
        if !options.includes_event(&canonical) {
            continue;
        }
        if !events::is_valid_event(&canonical) {
            tracing::warn!(group = name, event = %canonical, "skipping unsupported event");
            continue;
        }
        let Some(spec) = group.event(&canonical) else {
            continue;
        };

        let original = doc.hooks.clone();
        let before = snapshot(doc, ownership, name, &canonical);
        merge::take_matching(doc, Some(&canonical), |_, hook| {
            ownership.group_of(&hook.command).as_deref() == Some(name)
        });

        let matcher = options.matcher_for(&canonical).to_string();
        for job in &spec.jobs {
            let Some(job_name) = job.named() else {
                tracing::warn!(group = name, event = %canonical, "skipping unnamed job");
                continue;
            };
            let key = JobKey::new(name, job_name)?;
            let command = invocation::build(
                &options.executable,
                invocation::RUN_SUBCOMMAND,
                &key,
                &options.log_args,
            );
            let timeout = options
                .timeout_override
                .or(job.timeout)
                .or(options.default_timeout);
            merge::add_entry(doc, &canonical, &matcher, &command, timeout)?;
        }

        let after = snapshot(doc, ownership, name, &canonical);
        if before == after {
            // Restore exact placement relative to foreign hooks.
            doc.hooks = original;
            tracing::debug!(group = name, event = %canonical, "group hooks unchanged");
            continue;
        }
        diff(&canonical, before, after, report);
    }
    Ok(())
}

// Pairs hooks by job key; anything unmatched is an addition or removal.
fn diff(event: &str, before: Vec<Installed>, after: Vec<Installed>, report: &mut SyncReport) {
    let start = report.change_count();
    let mut previous: HashMap<Option<JobKey>, Vec<Installed>> = HashMap::new();
    for item in before {
        previous.entry(item.key.clone()).or_default().push(item);
    }

    for item in &after {
        let matched = previous.get_mut(&item.key).and_then(|items| {
            if items.is_empty() {
                None
            } else {
                Some(items.remove(0))
            }
        });
        match matched {
            None => report.record(ActionKind::Add, event, &item.command, None),
            Some(old) if old != *item => {
                let mut changes = Vec::new();
                if old.matcher != item.matcher {
                    changes.push(format!("matcher '{}' -> '{}'", old.matcher, item.matcher));
                }
                if old.timeout != item.timeout {
                    changes.push(format!("timeout {:?} -> {:?}", old.timeout, item.timeout));
                }
                if old.command != item.command {
                    changes.push(format!("was '{}'", old.command));
                }
                report.record(
                    ActionKind::Replace,
                    event,
                    &item.command,
                    Some(changes.join(", ")),
                );
            }
            Some(_) => {}
        }
    }

    let mut leftovers: Vec<Installed> = previous.into_values().flatten().collect();
    leftovers.sort_by(|a, b| a.command.cmp(&b.command));
    for item in leftovers {
        report.record(ActionKind::Remove, event, &item.command, None);
    }

    if report.change_count() == start {
        let command = after.first().map(|i| i.command.as_str()).unwrap_or_default();
        report.record(ActionKind::Replace, event, command, Some("reordered".to_string()));
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
