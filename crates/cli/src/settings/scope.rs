// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings scope definitions.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which settings file a command reads and writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsScope {
    /// User settings (~/.claude/settings.json)
    #[value(alias = "global")]
    #[serde(alias = "global")]
    User,
    /// Project settings (.claude/settings.json)
    #[default]
    Project,
    /// Local overrides (.claude/settings.local.json)
    Local,
}

impl SettingsScope {
    /// Return all scopes in precedence order (lowest to highest).
    pub fn all() -> &'static [SettingsScope] {
        &[Self::User, Self::Project, Self::Local]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" | "global" => Ok(Self::User),
            "project" => Ok(Self::Project),
            "local" => Ok(Self::Local),
            _ => Err(format!("unknown settings scope: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
