// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! IO helpers for JSON files with atomic replacement.

use std::io::Write;
use std::path::Path;

/// Parse content as JSON5, falling back to strict JSON on parse failure.
///
/// JSON5 supports comments and trailing commas, which hand-edited settings
/// files often contain. The strict JSON error is reported when both fail.
pub fn parse_json5_or_json<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_json::Error> {
    json5::from_str(content).or_else(|_| serde_json::from_str(content))
}

/// Ensure a file's parent directory exists, creating it and ancestors if needed.
pub fn ensure_parent_exists(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Replace `path` with `contents` atomically.
///
/// Writes a temp file in the destination directory and renames it over the
/// target, so readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    ensure_parent_exists(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".hookwright-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Serialize to pretty JSON with a trailing newline.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "io_tests.rs"]
mod tests;
