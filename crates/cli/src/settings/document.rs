// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings document schema.
//!
//! Matches the `hooks` section of Claude Code's settings.json:
//! ```json
//! {
//!   "hooks": {
//!     "PreToolUse": [
//!       {
//!         "matcher": "Bash",
//!         "hooks": [{ "type": "command", "command": "/bin/hookwright run config:lint:shellcheck", "timeout": 30 }]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Unknown fields at every level are captured so that entries written by
//! other tools survive a load/save cycle verbatim.

use std::fmt;

use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Command type used for every hook this tool installs.
pub const COMMAND_TYPE: &str = "command";

/// A single hook invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    /// Hook type (e.g., "command")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Invocation string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,

    /// Timeout in seconds
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timeout"
    )]
    pub timeout: Option<u64>,

    /// Fields this tool does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HookCommand {
    /// Create a command hook.
    pub fn new(command: impl Into<String>, timeout: Option<u64>) -> Self {
        Self {
            kind: Some(COMMAND_TYPE.to_string()),
            command: command.into(),
            timeout,
            extra: Map::new(),
        }
    }
}

// JSON5 reports every number as a float when buffered through `flatten`.
fn deserialize_timeout<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timeout: {n}"))),
        Some(other) => Err(D::Error::custom(format!(
            "invalid timeout: expected seconds, got {other}"
        ))),
    }
}

/// A tool-matcher pattern and the hooks it triggers.
///
/// `matcher` is always written, except on an entry read without one whose
/// matcher is still empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMatcherEntry", into = "RawMatcherEntry")]
pub struct MatcherEntry {
    /// Tool pattern: `*`, a tool name, or an alternation like `Edit|Write`.
    /// Empty when the event has no matcher.
    pub matcher: String,

    /// Hooks to run when the matcher applies
    pub hooks: Vec<HookCommand>,

    /// Fields this tool does not interpret
    pub extra: Map<String, Value>,

    /// The entry was read without a `matcher` key
    matcher_omitted: bool,
}

impl MatcherEntry {
    pub fn new(matcher: impl Into<String>, hooks: Vec<HookCommand>) -> Self {
        Self {
            matcher: matcher.into(),
            hooks,
            extra: Map::new(),
            matcher_omitted: false,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawMatcherEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matcher: Option<String>,
    #[serde(default)]
    hooks: Vec<HookCommand>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawMatcherEntry> for MatcherEntry {
    fn from(raw: RawMatcherEntry) -> Self {
        Self {
            matcher_omitted: raw.matcher.is_none(),
            matcher: raw.matcher.unwrap_or_default(),
            hooks: raw.hooks,
            extra: raw.extra,
        }
    }
}

impl From<MatcherEntry> for RawMatcherEntry {
    fn from(entry: MatcherEntry) -> Self {
        let matcher = if entry.matcher_omitted && entry.matcher.is_empty() {
            None
        } else {
            Some(entry.matcher)
        };
        Self {
            matcher,
            hooks: entry.hooks,
            extra: entry.extra,
        }
    }
}

/// Matcher entries for one event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventHooks {
    pub event: String,
    pub entries: Vec<MatcherEntry>,
}

/// Ordered mapping from event name to matcher entries.
///
/// Order is preserved as read and as inserted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookTable {
    events: Vec<EventHooks>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher entries for an event.
    pub fn get(&self, event: &str) -> Option<&[MatcherEntry]> {
        self.events
            .iter()
            .find(|e| e.event == event)
            .map(|e| e.entries.as_slice())
    }

    /// Mutable matcher entries for an event, if present.
    pub fn get_mut(&mut self, event: &str) -> Option<&mut Vec<MatcherEntry>> {
        self.events
            .iter_mut()
            .find(|e| e.event == event)
            .map(|e| &mut e.entries)
    }

    /// Matcher entries for an event, creating an empty list at the end.
    pub fn entry(&mut self, event: &str) -> &mut Vec<MatcherEntry> {
        let index = match self.events.iter().position(|e| e.event == event) {
            Some(index) => index,
            None => {
                self.events.push(EventHooks {
                    event: event.to_string(),
                    entries: Vec::new(),
                });
                self.events.len() - 1
            }
        };
        &mut self.events[index].entries
    }

    /// Remove an event and its entries.
    pub fn remove(&mut self, event: &str) -> Option<Vec<MatcherEntry>> {
        let index = self.events.iter().position(|e| e.event == event)?;
        Some(self.events.remove(index).entries)
    }

    /// Events in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatcherEntry])> {
        self.events
            .iter()
            .map(|e| (e.event.as_str(), e.entries.as_slice()))
    }

    /// Mutable events in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<MatcherEntry>)> {
        self.events
            .iter_mut()
            .map(|e| (e.event.as_str(), &mut e.entries))
    }

    /// Event names in order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.event.as_str())
    }

    /// Total hook commands across every event.
    pub fn hook_count(&self) -> usize {
        self.events
            .iter()
            .flat_map(|e| &e.entries)
            .map(|m| m.hooks.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Serialize for HookTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.events.len()))?;
        for event in &self.events {
            map.serialize_entry(&event.event, &event.entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HookTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = HookTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of event names to matcher entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HookTable, A::Error> {
                let mut table = HookTable::new();
                while let Some((event, entries)) =
                    access.next_entry::<String, Vec<MatcherEntry>>()?
                {
                    table.entry(&event).extend(entries);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// A Claude Code settings file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Hook registrations
    #[serde(default, skip_serializing_if = "HookTable::is_empty")]
    pub hooks: HookTable,

    /// Every other top-level setting, preserved as read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        super::io::to_pretty_json(self)
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
