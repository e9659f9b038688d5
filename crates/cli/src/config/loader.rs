// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-file configuration loading with precedence.
//!
//! 1. Global (`<config dir>/hooks.yaml`) - lowest priority
//! 2. Project (`.hookwright.yaml`, or `.hookwright/hooks.yaml`) - highest priority
//!
//! Within a scope the first existing candidate wins. A group defined in both
//! scopes is replaced wholesale by the project version.

use std::path::{Path, PathBuf};

use super::{ConfigError, Configuration};
use crate::settings::io::parse_json5_or_json;

/// Extensions tried for each candidate stem, in order.
const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Candidate files for each scope.
#[derive(Clone, Debug, Default)]
pub struct ConfigPaths {
    /// Global candidates, first existing wins
    pub global: Vec<PathBuf>,
    /// Project candidates, first existing wins
    pub project: Vec<PathBuf>,
}

impl ConfigPaths {
    /// Resolve candidates for a config directory and project root.
    ///
    /// # Arguments
    /// * `config_dir` - The hookwright config directory, if one could be determined
    /// * `project_root` - The project root
    pub fn resolve(config_dir: Option<&Path>, project_root: &Path) -> Self {
        let global = config_dir
            .map(|dir| with_extensions(&dir.join("hooks")))
            .unwrap_or_default();
        let mut project = with_extensions(&project_root.join(".hookwright"));
        project.extend(with_extensions(
            &project_root.join(".hookwright").join("hooks"),
        ));
        Self { global, project }
    }

    /// Candidates for a project only (no global file).
    pub fn project_only(project_root: &Path) -> Self {
        Self::resolve(None, project_root)
    }
}

fn with_extensions(stem: &Path) -> Vec<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| stem.with_extension(ext))
        .collect()
}

/// Loads and merges configuration files.
pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// Load and merge the global and project configuration.
    ///
    /// Returns `None` when no candidate file exists in either scope.
    pub fn load(&self) -> Result<Option<Configuration>, ConfigError> {
        let mut merged: Option<Configuration> = None;

        for path in self.existing_files() {
            let config = load_file(path)?;
            tracing::debug!(
                path = %path.display(),
                groups = config.groups.len(),
                "loaded hook configuration"
            );
            merged.get_or_insert_with(Configuration::new).merge(config);
        }

        Ok(merged)
    }

    /// The file in use for each scope, global first.
    pub fn existing_files(&self) -> Vec<&Path> {
        [&self.paths.global, &self.paths.project]
            .into_iter()
            .filter_map(|candidates| candidates.iter().find(|p| p.is_file()))
            .map(PathBuf::as_path)
            .collect()
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }
}

/// Load one configuration file, choosing the format by extension.
///
/// A blank file is an empty configuration.
pub fn load_file(path: &Path) -> Result<Configuration, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &content)
}

fn parse(path: &Path, content: &str) -> Result<Configuration, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Configuration::new());
    }

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json5_or_json(content).map_err(|e| parse_error(e.to_string())),
        _ => {
            // An explicit `~` or empty document parses as null.
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            if value.is_null() {
                return Ok(Configuration::new());
            }
            serde_yaml::from_value(value).map_err(|e| parse_error(e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
