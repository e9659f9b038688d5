// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The hook stdin channel and its scoped redirection.
//!
//! Hooks read their payload through [`read_hook_input`], which normally reads
//! process stdin. The bridge substitutes an in-memory pipe for the duration of
//! one hook run with [`StdinRedirect::install`]; dropping the guard restores
//! whatever source was active before, on every exit path.

use std::io::IsTerminal;

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;

/// Capacity of the in-memory pipe; larger payloads stream through it.
pub const PIPE_CAPACITY: usize = 64 * 1024;

type Source = Box<dyn AsyncRead + Send + Unpin>;

static REDIRECT: Mutex<Option<Source>> = parking_lot::const_mutex(None);

/// Guard for an active stdin redirection.
#[must_use = "the redirection ends when the guard is dropped"]
pub struct StdinRedirect {
    previous: Option<Source>,
    writer: Option<JoinHandle<()>>,
}

impl StdinRedirect {
    /// Redirect the hook stdin channel to `payload`.
    ///
    /// A background task writes the payload into a bounded pipe and then
    /// shuts down its end so the reader observes EOF. Must be called from
    /// within a tokio runtime.
    pub fn install(payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        let (reader, mut writer) = tokio::io::duplex(PIPE_CAPACITY);
        let task = tokio::spawn(async move {
            if let Err(e) = writer.write_all(&payload).await {
                tracing::debug!(error = %e, "stdin redirect reader went away");
                return;
            }
            if let Err(e) = writer.shutdown().await {
                tracing::debug!(error = %e, "failed to close stdin redirect");
            }
        });

        let previous = REDIRECT.lock().replace(Box::new(reader));
        tracing::debug!(nested = previous.is_some(), "installed stdin redirect");
        Self {
            previous,
            writer: Some(task),
        }
    }
}

impl Drop for StdinRedirect {
    fn drop(&mut self) {
        *REDIRECT.lock() = self.previous.take();
        if let Some(writer) = self.writer.take() {
            writer.abort();
        }
    }
}

/// Read the whole hook input.
///
/// Uses the active redirection if there is one, else process stdin. An
/// interactive terminal yields empty input rather than blocking.
pub async fn read_hook_input() -> std::io::Result<String> {
    let redirected = REDIRECT.lock().take();
    let mut input = String::new();
    match redirected {
        Some(mut source) => {
            source.read_to_string(&mut input).await?;
        }
        None => {
            if std::io::stdin().is_terminal() {
                return Ok(input);
            }
            tokio::io::stdin().read_to_string(&mut input).await?;
        }
    }
    Ok(input)
}

/// Serializes tests that touch the process-wide redirection.
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = parking_lot::const_mutex(());

#[cfg(test)]
#[path = "stdin_tests.rs"]
mod tests;
