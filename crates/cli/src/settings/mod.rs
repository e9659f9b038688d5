// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Claude Code settings files.
//!
//! A settings document maps each lifecycle event to an ordered list of
//! matcher entries, each holding ordered hook commands. Everything else in
//! the file is carried through untouched.

pub mod document;
pub mod io;
pub mod scope;
pub mod store;

pub use document::{HookCommand, HookTable, MatcherEntry, SettingsDocument};
pub use scope::SettingsScope;
pub use store::{SettingsError, SettingsStore};
