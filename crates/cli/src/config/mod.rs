// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative hook configuration.
//!
//! ```yaml
//! lint:
//!   PostToolUse:
//!     jobs:
//!       - name: eslint
//!         run: npx eslint --fix {files}
//!         glob: ["*.ts", "*.tsx"]
//!         timeout: 60
//!   PreToolUse:
//!     jobs:
//!       - name: no-force-push
//!         run: ./scripts/deny-force-push.sh
//!         only: tool == "Bash"
//! ```

pub mod condition;
pub mod loader;

pub use condition::{Condition, ConditionError, Facts};
pub use loader::{ConfigLoader, ConfigPaths};

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events;
use crate::invocation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid hook configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One structural problem found by [`Configuration::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    /// `group`, `group.event`, or `group.event.job`
    pub location: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// A single job.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job name, unique within its group and event. Unnamed jobs are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Shell command template
    #[serde(default)]
    pub run: String,

    /// File globs; the job runs only if a changed file matches one
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "one_or_many"
    )]
    pub glob: Vec<String>,

    /// Conditional expression over the hook context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<String>,

    /// Timeout in seconds recorded in the platform settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Job {
    /// The job's name when it has a usable one.
    pub fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

fn one_or_many<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// Jobs declared for one event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl EventSpec {
    /// Jobs with names, in declaration order.
    pub fn named_jobs(&self) -> impl Iterator<Item = (&str, &Job)> {
        self.jobs.iter().filter_map(|j| j.named().map(|n| (n, j)))
    }
}

/// A named group of event specs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    /// Event name (canonical or alias) to spec
    pub events: BTreeMap<String, EventSpec>,
}

impl Group {
    /// Event spec by canonical name, resolving aliases used as keys.
    pub fn event(&self, canonical: &str) -> Option<&EventSpec> {
        self.events
            .iter()
            .find(|(name, _)| events::canonicalize(name) == canonical)
            .map(|(_, spec)| spec)
    }

    /// Canonical names of the events this group declares.
    pub fn canonical_events(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.events.keys() {
            let canonical = events::canonicalize(name).to_string();
            if !names.contains(&canonical) {
                names.push(canonical);
            }
        }
        names
    }
}

/// Merged configuration: group name to group.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    pub groups: BTreeMap<String, Group>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Overlay `other` on top of this configuration.
    ///
    /// A group present in both is replaced wholesale by `other`'s version;
    /// jobs are not merged individually.
    pub fn merge(&mut self, other: Configuration) {
        for (name, group) in other.groups {
            self.groups.insert(name, group);
        }
    }

    /// Find a declared job by group, job name, and optionally canonical event.
    ///
    /// Without an event, the first event (in name order) declaring the job wins.
    pub fn find_job(&self, group: &str, job: &str, event: Option<&str>) -> Option<(String, &Job)> {
        let group = self.groups.get(group)?;
        group.events.iter().find_map(|(name, spec)| {
            let canonical = events::canonicalize(name);
            if event.is_some_and(|e| e != canonical) {
                return None;
            }
            spec.named_jobs()
                .find(|(n, _)| *n == job)
                .map(|(_, j)| (canonical.to_string(), j))
        })
    }

    /// Check structural well-formedness, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Every structural problem in the configuration.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (group_name, group) in &self.groups {
            if group_name.trim().is_empty() {
                issues.push(ValidationIssue::new("<root>", "group name is empty"));
                continue;
            }
            if let Err(e) = invocation::check_name("group", group_name) {
                issues.push(ValidationIssue::new(group_name.as_str(), e.to_string()));
            }

            let mut seen_events: HashSet<&str> = HashSet::new();
            for (event_name, spec) in &group.events {
                let location = format!("{group_name}.{event_name}");
                let canonical = events::canonicalize(event_name);
                match events::lookup(event_name) {
                    None => issues.push(ValidationIssue::new(
                        location.as_str(),
                        format!(
                            "unknown event '{event_name}' (valid events: {})",
                            events::valid_event_names().join(", ")
                        ),
                    )),
                    Some(info) if !info.supported => issues.push(ValidationIssue::new(
                        location.as_str(),
                        format!("event '{}' is not supported for installed hooks", info.name),
                    )),
                    Some(_) => {}
                }
                if !seen_events.insert(canonical) {
                    issues.push(ValidationIssue::new(
                        location.as_str(),
                        format!("event '{canonical}' is declared more than once"),
                    ));
                }

                let mut seen_jobs: HashSet<&str> = HashSet::new();
                for job in &spec.jobs {
                    let Some(job_name) = job.named() else {
                        continue;
                    };
                    let job_location = format!("{location}.{job_name}");
                    if !seen_jobs.insert(job_name) {
                        issues.push(ValidationIssue::new(
                            job_location.as_str(),
                            "duplicate job name",
                        ));
                    }
                    if let Err(e) = invocation::check_name("job", job_name) {
                        issues.push(ValidationIssue::new(job_location.as_str(), e.to_string()));
                    }
                    if job.run.trim().is_empty() {
                        issues.push(ValidationIssue::new(
                            job_location.as_str(),
                            "run command is empty",
                        ));
                    }
                    if let Some(only) = &job.only {
                        if let Err(e) = Condition::parse(only) {
                            issues.push(ValidationIssue::new(
                                job_location.as_str(),
                                format!("invalid 'only' expression: {e}"),
                            ));
                        }
                    }
                    for pattern in &job.glob {
                        if let Err(e) = glob::Pattern::new(pattern) {
                            issues.push(ValidationIssue::new(
                                job_location.as_str(),
                                format!("invalid glob '{pattern}': {e}"),
                            ));
                        }
                    }
                }
            }
        }

        issues
    }

    /// Number of unnamed (skipped) jobs, for warnings.
    pub fn unnamed_jobs(&self) -> Vec<String> {
        let mut found = Vec::new();
        for (group_name, group) in &self.groups {
            for (event_name, spec) in &group.events {
                let count = spec.jobs.iter().filter(|j| j.named().is_none()).count();
                if count > 0 {
                    found.push(format!("{group_name}.{event_name} ({count} unnamed)"));
                }
            }
        }
        found
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
