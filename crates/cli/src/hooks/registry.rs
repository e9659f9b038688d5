// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hook registry keyed by hook key.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::executor::ConfigJobHook;
use super::Hook;
use crate::config::Configuration;
use crate::events;
use crate::invocation::JobKey;

/// Runnable hooks by key, e.g. `config:lint:eslint`.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: BTreeMap<String, Arc<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one `config:<group>:<job>` hook per declared job.
    ///
    /// A job declared under several events becomes one hook handling all of
    /// them. Jobs whose names cannot form a key are skipped with a warning.
    pub fn from_config(config: &Configuration) -> Self {
        let mut by_key: BTreeMap<JobKey, ConfigJobHook> = BTreeMap::new();

        for (group_name, group) in &config.groups {
            for (event_name, spec) in &group.events {
                let canonical = events::canonicalize(event_name);
                for (job_name, job) in spec.named_jobs() {
                    let key = match JobKey::new(group_name.as_str(), job_name) {
                        Ok(key) => key,
                        Err(e) => {
                            tracing::warn!(group = %group_name, job = %job_name, error = %e, "skipping job");
                            continue;
                        }
                    };
                    let hook = by_key
                        .remove(&key)
                        .unwrap_or_else(|| ConfigJobHook::new(key.clone()));
                    by_key.insert(key, hook.with_job(canonical, job.clone()));
                }
            }
        }

        let mut registry = Self::new();
        for (key, hook) in by_key {
            registry.register(key.to_string(), Arc::new(hook));
        }
        tracing::debug!(hooks = registry.len(), "built hook registry");
        registry
    }

    /// Register a hook, replacing any hook already under `key`.
    pub fn register(&mut self, key: impl Into<String>, hook: Arc<dyn Hook>) {
        self.hooks.insert(key.into(), hook);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Hook>> {
        self.hooks.get(key).cloned()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Hook>)> {
        self.hooks.iter().map(|(k, h)| (k.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("keys", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
