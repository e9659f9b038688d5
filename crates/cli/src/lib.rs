// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative hook manager for Claude Code and Cursor.
//!
//! Hook groups declared in `.hookwright.yaml` are projected into Claude Code
//! `settings.json` files and Cursor `hooks.json` files as invocations of this
//! binary. At event time the binary runs the declared job, and for Cursor it
//! translates the native JSON protocol to the canonical payload and back.

pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod env;
pub mod error;
pub mod events;
pub mod hooks;
pub mod invocation;
pub mod logging;
pub mod merge;
pub mod output;
pub mod prefs;
pub mod settings;
pub mod sync;
