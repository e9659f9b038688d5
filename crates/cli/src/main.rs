// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! hookwright binary entry point.

use clap::Parser;

use hookwright::cli::Cli;
use hookwright::commands;
use hookwright::output::{print_error, print_hint};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match commands::execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&e);
            if let Some(hint) = e.suggestion() {
                print_hint(hint);
            }
            e.exit_code()
        }
    };
    std::process::exit(code);
}
