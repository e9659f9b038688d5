// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Job execution for declared hooks.
//!
//! A job runs as `sh -c <run>` in the event's working directory, with the
//! projected environment and the canonical payload on stdin. Filters (`glob`,
//! `only`) are checked first; a job that does not apply succeeds without
//! running.

use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use super::context::HookContext;
use super::{Hook, HookError, HookFuture};
use crate::config::{Condition, Job};
use crate::invocation::{quote, JobKey};

/// Shell used to run job commands.
const SHELL: &str = "sh";

/// A declared job, runnable for each event it is declared under.
#[derive(Clone, Debug)]
pub struct ConfigJobHook {
    key: JobKey,
    /// Canonical event name and the job declared for it
    jobs: Vec<(String, Job)>,
}

impl ConfigJobHook {
    pub fn new(key: JobKey) -> Self {
        Self {
            key,
            jobs: Vec::new(),
        }
    }

    /// Declare the job for a canonical event.
    pub fn with_job(mut self, event: impl Into<String>, job: Job) -> Self {
        self.jobs.push((event.into(), job));
        self
    }

    pub fn key(&self) -> &JobKey {
        &self.key
    }

    /// Canonical events this hook handles.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|(event, _)| event.as_str())
    }

    /// The job to run for an event.
    ///
    /// An event-less payload selects the job when it is declared for exactly
    /// one event.
    pub fn job_for(&self, event: &str) -> Option<&Job> {
        if event.is_empty() {
            return match self.jobs.as_slice() {
                [(_, job)] => Some(job),
                _ => None,
            };
        }
        self.jobs.iter().find(|(e, _)| e == event).map(|(_, job)| job)
    }
}

impl Hook for ConfigJobHook {
    fn run<'a>(&'a self, ctx: &'a HookContext) -> HookFuture<'a> {
        Box::pin(async move {
            let job = self
                .job_for(&ctx.event)
                .ok_or_else(|| HookError::UnhandledEvent {
                    key: self.key.to_string(),
                    event: ctx.event.clone(),
                })?;
            run_job(&self.key.to_string(), job, ctx).await
        })
    }

    fn description(&self) -> String {
        let events: Vec<&str> = self.events().collect();
        let run = self
            .jobs
            .first()
            .map(|(_, job)| job.run.as_str())
            .unwrap_or_default();
        format!("{run} [{}]", events.join(", "))
    }
}

/// Whether the job's `glob` and `only` filters admit this event.
pub fn applies(key: &str, job: &Job, ctx: &HookContext) -> Result<bool, HookError> {
    let invalid = |message: String| HookError::InvalidJob {
        key: key.to_string(),
        message,
    };

    if !job.glob.is_empty() {
        let patterns = job
            .glob
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(|e| invalid(format!("glob '{p}': {e}"))))
            .collect::<Result<Vec<_>, _>>()?;
        let matched = ctx.files.iter().any(|file| {
            let name = Path::new(file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(file.as_str());
            patterns
                .iter()
                .any(|p| p.matches(file) || p.matches(name))
        });
        if !matched {
            tracing::debug!(key, files = ?ctx.files, "no changed file matches glob");
            return Ok(false);
        }
    }

    if let Some(only) = &job.only {
        let condition =
            Condition::parse(only).map_err(|e| invalid(format!("only '{only}': {e}")))?;
        if !condition.evaluate(&ctx.facts()) {
            tracing::debug!(key, only = %only, "condition is false");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Substitute `{tool}`, `{event}`, `{file}`, `{files}`, `{cwd}` and `{prompt}`.
///
/// Values are shell-quoted; unknown placeholders are left verbatim.
pub fn expand(template: &str, ctx: &HookContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match placeholder(name, ctx) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn placeholder(name: &str, ctx: &HookContext) -> Option<String> {
    let single = |value: &str| {
        if value.is_empty() {
            String::new()
        } else {
            quote(value).into_owned()
        }
    };
    Some(match name {
        "tool" => single(ctx.tool_name()),
        "event" => single(&ctx.event),
        "file" => single(ctx.file()),
        "files" => ctx
            .files
            .iter()
            .map(|f| quote(f).into_owned())
            .collect::<Vec<_>>()
            .join(" "),
        "cwd" => single(&ctx.cwd.to_string_lossy()),
        "prompt" => single(ctx.prompt()),
        _ => return None,
    })
}

/// Run a job for an event.
pub async fn run_job(key: &str, job: &Job, ctx: &HookContext) -> Result<(), HookError> {
    if !applies(key, job, ctx)? {
        return Ok(());
    }

    let command = expand(&job.run, ctx);
    let payload = ctx
        .payload
        .to_json()
        .map_err(|e| HookError::InvalidPayload(e.to_string()))?;
    tracing::debug!(key, command = %command, cwd = %ctx.cwd.display(), "running job");

    let mut child = Command::new(SHELL)
        .arg("-c")
        .arg(&command)
        .current_dir(&ctx.cwd)
        .envs(ctx.env())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| HookError::Spawn {
            key: key.to_string(),
            source,
        })?;

    // Stdin is fed while output drains; jobs may write before reading.
    let stdin = child.stdin.take();
    let feed = async move {
        if let Some(mut stdin) = stdin {
            // A job that exits without reading its input is not an error.
            if let Err(e) = write_payload(&mut stdin, payload.as_bytes()).await {
                tracing::debug!(key, error = %e, "job closed stdin early");
            }
        }
    };
    let ((), output) = tokio::join!(feed, child.wait_with_output());
    let output = output?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        let message = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        tracing::warn!(key, code = ?output.status.code(), "job failed");
        return Err(HookError::JobFailed {
            key: key.to_string(),
            code: output.status.code(),
            message: message.to_string(),
        });
    }

    if ctx.forward_output {
        let mut out = tokio::io::stdout();
        out.write_all(&output.stdout).await?;
        out.flush().await?;
    } else if !stdout.trim().is_empty() {
        tracing::debug!(key, stdout = %stdout.trim(), "job output");
    }
    if !stderr.trim().is_empty() {
        tracing::debug!(key, stderr = %stderr.trim(), "job stderr");
    }
    Ok(())
}

async fn write_payload<W: AsyncWrite + Unpin>(stdin: &mut W, payload: &[u8]) -> std::io::Result<()> {
    stdin.write_all(payload).await?;
    stdin.flush().await?;
    stdin.shutdown().await
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
