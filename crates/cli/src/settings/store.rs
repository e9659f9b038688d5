// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scope settings persistence.
//!
//! Scope resolution:
//! 1. User (`~/.claude/settings.json`, or `$CLAUDE_CONFIG_DIR/settings.json`)
//! 2. Project (`.claude/settings.json`)
//! 3. Local (`.claude/settings.local.json`)

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::document::SettingsDocument;
use super::io::{parse_json5_or_json, write_atomic};
use super::scope::SettingsScope;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write settings {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Path of the settings file involved, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => {
                Some(path)
            }
            Self::Serialize(_) => None,
        }
    }
}

/// Loads and saves settings documents by scope.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    /// The ~/.claude equivalent
    claude_dir: PathBuf,
    /// Project root containing `.claude/`
    project_root: PathBuf,
}

impl SettingsStore {
    pub fn new(claude_dir: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            project_root: project_root.into(),
        }
    }

    /// Path of the settings file for a scope.
    pub fn path(&self, scope: SettingsScope) -> PathBuf {
        match scope {
            SettingsScope::User => self.claude_dir.join("settings.json"),
            SettingsScope::Project => self.project_root.join(".claude").join("settings.json"),
            SettingsScope::Local => self
                .project_root
                .join(".claude")
                .join("settings.local.json"),
        }
    }

    /// Load the document for a scope.
    ///
    /// A missing or blank file is an empty document, not an error.
    pub fn load(&self, scope: SettingsScope) -> Result<SettingsDocument, SettingsError> {
        load_document(&self.path(scope))
    }

    /// Persist the document for a scope atomically.
    pub fn save(&self, scope: SettingsScope, doc: &SettingsDocument) -> Result<(), SettingsError> {
        save_document(&self.path(scope), doc)
    }
}

/// Load a settings document from a path.
pub fn load_document(path: &Path) -> Result<SettingsDocument, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file yet");
            return Ok(SettingsDocument::new());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(SettingsDocument::new());
    }

    parse_json5_or_json(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a settings document to a path.
pub fn save_document(path: &Path, doc: &SettingsDocument) -> Result<(), SettingsError> {
    let json = doc.to_json()?;
    write_atomic(path, &json).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), hooks = doc.hooks.hook_count(), "saved settings");
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
