// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{print_report, Context};
use crate::cli::{Platform, UninstallArgs};
use crate::cursor::{is_bridge_command, CursorHooksFile};
use crate::error::{Error, Result};
use crate::events::canonicalize;
use crate::invocation::{logical_identity, Ownership};
use crate::merge;
use crate::settings::SettingsDocument;
use crate::sync::{ActionKind, SyncReport};

/// Which installed commands to remove.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Selection<'a> {
    Command(&'a str),
    Group { group: &'a str, event: Option<&'a str> },
    All,
}

impl<'a> Selection<'a> {
    fn from_args(args: &'a UninstallArgs) -> Result<Self> {
        match (&args.command, &args.group, args.all) {
            (Some(command), _, _) => Ok(Self::Command(command)),
            (None, Some(group), _) => Ok(Self::Group {
                group,
                event: args.event.as_deref(),
            }),
            (None, None, true) => Ok(Self::All),
            (None, None, false) => Err(Error::Usage(
                "name a command to remove, or pass --group or --all".into(),
            )),
        }
    }

    /// Whether a Cursor hook under `native` is selected.
    fn selects_cursor(&self, ownership: &Ownership, native: &str, command: &str) -> bool {
        match self {
            Self::Command(target) => {
                command == *target || logical_identity(command) == logical_identity(target)
            }
            Self::Group { group, event } => {
                is_bridge_command(ownership, command)
                    && ownership.group_of(command).as_deref() == Some(*group)
                    && event.is_none_or(|e| e == native || canonicalize(e) == canonicalize(native))
            }
            Self::All => is_bridge_command(ownership, command),
        }
    }
}

pub fn run(ctx: &Context, args: &UninstallArgs) -> Result<i32> {
    let selection = Selection::from_args(args)?;
    let scope = ctx.scope(args.scope);
    let ownership = ctx.ownership();

    let mut report = SyncReport::default();
    let path = match args.platform {
        Platform::Claude => {
            let store = ctx.settings_store(scope)?;
            let mut doc = store.load(scope)?;
            report.removed = remove_claude(&mut doc, &selection, &ownership);
            let path = store.path(scope);
            if report.removed > 0 {
                store.save(scope, &doc)?;
            }
            path
        }
        Platform::Cursor => {
            let path = ctx.cursor_path(scope)?;
            let mut file = CursorHooksFile::load(&path)?;
            let removed = file.remove_where(|native, hook| {
                selection.selects_cursor(&ownership, native, &hook.command)
            });
            for (native, command) in &removed {
                report.record(ActionKind::Remove, native, command, None);
            }
            if !removed.is_empty() {
                file.save(&path)?;
            }
            path
        }
    };

    if report.is_empty() {
        return Err(Error::NotFound(format!(
            "no matching hooks installed in {}",
            path.display()
        )));
    }
    print_report(&report, false);
    Ok(0)
}

fn remove_claude(doc: &mut SettingsDocument, selection: &Selection<'_>, ownership: &Ownership) -> usize {
    match selection {
        Selection::Command(target) => merge::remove_entry(doc, target),
        Selection::Group { group, event } => {
            merge::remove_by_group(doc, group, event.map(canonicalize), ownership)
        }
        Selection::All => merge::remove_all(doc, |command| ownership.owns(command)),
    }
}

#[cfg(test)]
#[path = "uninstall_tests.rs"]
mod tests;
