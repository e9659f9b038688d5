// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation strings for installed hooks.
//!
//! Installed commands embed the group and job they came from:
//!
//! ```text
//! /usr/local/bin/hookwright run config:lint:eslint --log-level debug
//! ```
//!
//! The group sync engine recovers group/job identity from persisted settings
//! purely by parsing this string, so group and job names may not contain
//! `:` or whitespace.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Subcommand that Claude Code settings entries invoke.
pub const RUN_SUBCOMMAND: &str = "run";

/// Subcommand that Cursor `hooks.json` entries invoke.
pub const BRIDGE_SUBCOMMAND: &str = "cursor";

/// Prefix of a declarative job key.
pub const CONFIG_PREFIX: &str = "config:";

/// Trailing flags that only affect logging and never the hook's identity.
const LOG_FLAGS: &[&str] = &["--log", "--verbose", "-v", "--quiet", "-q"];

/// Trailing flags that take a value and only affect logging.
const LOG_VALUE_FLAGS: &[&str] = &["--log-file", "--log-level"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("{kind} name is empty")]
    EmptyName { kind: &'static str },

    #[error("{kind} name '{name}' contains '{ch}', which breaks the config:<group>:<job> convention")]
    ReservedCharacter {
        kind: &'static str,
        name: String,
        ch: char,
    },
}

/// Identity of a declarative job: `config:<group>:<job>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey {
    pub group: String,
    pub job: String,
}

impl JobKey {
    /// Create a key, rejecting names that would corrupt the convention.
    pub fn new(group: impl Into<String>, job: impl Into<String>) -> Result<Self, InvocationError> {
        let group = group.into();
        let job = job.into();
        check_name("group", &group)?;
        check_name("job", &job)?;
        Ok(Self { group, job })
    }

    /// Parse `config:<group>:<job>`.
    pub fn parse(key: &str) -> Option<Self> {
        let rest = key.strip_prefix(CONFIG_PREFIX)?;
        let (group, job) = rest.split_once(':')?;
        if group.is_empty() || job.is_empty() || job.contains(':') {
            return None;
        }
        Some(Self {
            group: group.to_string(),
            job: job.to_string(),
        })
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}", CONFIG_PREFIX, self.group, self.job)
    }
}

/// Key naming every job of a group: `config:<group>`.
pub fn group_key(group: &str) -> String {
    format!("{CONFIG_PREFIX}{group}")
}

/// Check a group or job name against the convention.
pub fn check_name(kind: &'static str, name: &str) -> Result<(), InvocationError> {
    if name.is_empty() {
        return Err(InvocationError::EmptyName { kind });
    }
    if let Some(ch) = name
        .chars()
        .find(|c| *c == ':' || c.is_whitespace() || matches!(c, '\'' | '"' | '\\'))
    {
        return Err(InvocationError::ReservedCharacter {
            kind,
            name: name.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Build an invocation string: `<exe> <subcommand> <key> [extra...]`.
pub fn build(executable: &Path, subcommand: &str, key: &JobKey, extra: &[String]) -> String {
    let exe = executable.to_string_lossy();
    let mut parts: Vec<Cow<'_, str>> = vec![quote(&exe), Cow::Borrowed(subcommand)];
    let key = key.to_string();
    parts.push(Cow::Owned(key));
    parts.extend(extra.iter().map(|a| quote(a)));
    parts.join(" ")
}

/// Split a command line into words, honoring single quotes, double quotes,
/// and backslash escapes.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some(e @ ('"' | '\\' | '$' | '`')) => current.push(e),
                            Some(e) => {
                                current.push('\\');
                                current.push(e);
                            }
                            None => current.push('\\'),
                        },
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(e) = chars.next() {
                    current.push(e);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            _ => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Quote a word for `sh` if it contains anything outside a safe set.
pub fn quote(word: &str) -> Cow<'_, str> {
    let safe = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',')
        });
    if safe {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// The invocation with trailing logging flags stripped.
///
/// Reinstalling the same hook with a different logging flag yields the same
/// logical identity.
pub fn logical_identity(command: &str) -> String {
    let mut words = tokenize(command);
    loop {
        let Some(last) = words.last() else {
            break;
        };
        if LOG_FLAGS.contains(&last.as_str())
            || LOG_VALUE_FLAGS
                .iter()
                .any(|flag| last.starts_with(&format!("{flag}=")))
        {
            words.pop();
            continue;
        }
        let len = words.len();
        if len >= 2 && LOG_VALUE_FLAGS.contains(&words[len - 2].as_str()) {
            words.truncate(len - 2);
            continue;
        }
        break;
    }
    words
        .iter()
        .map(|w| quote(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recognizes commands installed by this tool.
#[derive(Clone, Debug)]
pub struct Ownership {
    exe_name: String,
}

impl Ownership {
    /// Recognize commands whose executable has the given file stem.
    pub fn new(exe_name: impl Into<String>) -> Self {
        Self {
            exe_name: exe_name.into(),
        }
    }

    /// Recognize commands invoking the given executable path.
    pub fn for_executable(executable: &Path) -> Self {
        let stem = executable
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self::new(stem)
    }

    /// Whether the command was installed by this tool.
    ///
    /// The executable's file stem must match and the next word must be one
    /// of this tool's hook subcommands.
    pub fn owns(&self, command: &str) -> bool {
        let words = tokenize(command);
        let Some(exe) = words.first() else {
            return false;
        };
        let stem = Path::new(exe)
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        stem == self.exe_name.as_str()
            && words
                .get(1)
                .is_some_and(|w| w == RUN_SUBCOMMAND || w == BRIDGE_SUBCOMMAND)
    }

    /// Job key of a command this tool installed.
    ///
    /// Commands from other tools never yield a key, whatever their arguments.
    pub fn job_key(&self, command: &str) -> Option<JobKey> {
        if !self.owns(command) {
            return None;
        }
        tokenize(command).get(2).and_then(|word| JobKey::parse(word))
    }

    /// Group of a command this tool installed.
    pub fn group_of(&self, command: &str) -> Option<String> {
        self.job_key(command).map(|k| k.group)
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
