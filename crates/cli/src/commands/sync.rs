// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{print_report, Context};
use crate::cli::{Platform, SyncArgs};
use crate::cursor::{sync_cursor, CursorHooksFile};
use crate::error::Result;
use crate::sync::sync;

pub fn run(ctx: &Context, args: &SyncArgs) -> Result<i32> {
    let config = ctx.load_config()?;
    let options = ctx.sync_options(args)?;
    let scope = ctx.scope(args.scope);

    let (report, path) = match args.platform {
        Platform::Claude => {
            let store = ctx.settings_store(scope)?;
            let mut doc = store.load(scope)?;
            let report = sync(&mut doc, &config, &options)?;
            if !args.dry_run && !report.is_empty() {
                store.save(scope, &doc)?;
            }
            (report, store.path(scope))
        }
        Platform::Cursor => {
            let path = ctx.cursor_path(scope)?;
            let mut file = CursorHooksFile::load(&path)?;
            let report = sync_cursor(&mut file, &config, &options)?;
            if !args.dry_run && !report.is_empty() {
                file.save(&path)?;
            }
            (report, path)
        }
    };

    print_report(&report, args.dry_run);
    if report.is_empty() {
        println!("{} is up to date", path.display());
    } else if args.dry_run {
        println!("dry run, {} not written", path.display());
    } else {
        println!("wrote {}", path.display());
    }
    Ok(0)
}
