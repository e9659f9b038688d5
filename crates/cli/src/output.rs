// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output helpers for consistent error/warning formatting.
//!
//! Provides ANSI color support with automatic terminal detection. Stdout is
//! reserved for command results and hook protocol responses; everything here
//! goes to stderr.

use std::io::{self, IsTerminal, Write};

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

/// Write an error message to a writer with explicit terminal flag.
fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[31mError: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Error: {}", msg);
    }
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

/// Write a warning message to a writer with explicit terminal flag.
fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[33mWarning: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Warning: {}", msg);
    }
}

/// Print a follow-up hint for the previous error.
pub fn print_hint(msg: impl std::fmt::Display) {
    let _ = writeln!(io::stderr(), "  hint: {}", msg);
}

/// Print a doctor check line to stdout.
pub fn print_check(ok: bool, msg: impl std::fmt::Display) {
    let is_tty = io::stdout().is_terminal();
    write_check(&mut io::stdout(), ok, msg, is_tty);
}

fn write_check<W: Write>(writer: &mut W, ok: bool, msg: impl std::fmt::Display, is_terminal: bool) {
    let (mark, color) = if ok { ("ok", "32") } else { ("FAIL", "31") };
    if is_terminal {
        let _ = writeln!(writer, "\x1b[{color}m[{mark}]\x1b[0m {msg}");
    } else {
        let _ = writeln!(writer, "[{mark}] {msg}");
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
