// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-device FIFO queues of pending command envelopes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::state::epoch_ms;

/// One queued command. The payload is opaque to the hub: it is stored and
/// delivered verbatim, never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub id: String,
    pub payload: serde_json::Value,
    pub enqueued_at_ms: u64,
}

/// Pending-command store, one FIFO queue per registered device.
///
/// Queues are created empty at registration and removed at eviction, so
/// queue membership always mirrors directory membership.
pub struct CommandQueueStore {
    queues: RwLock<HashMap<String, Vec<CommandEnvelope>>>,
}

impl CommandQueueStore {
    pub fn new() -> Self {
        Self { queues: RwLock::new(HashMap::new()) }
    }

    /// Ensure a queue exists for `code`. Idempotent: a heartbeat
    /// re-registration never clears pending commands.
    pub async fn create(&self, code: &str) {
        self.queues.write().await.entry(code.to_owned()).or_default();
    }

    /// Append a command for `code`, returning the generated envelope id.
    ///
    /// Returns `None` when `code` has no queue (unknown or already
    /// evicted). Enqueue never creates a queue, so the console cannot
    /// resurrect a device mid-eviction.
    pub async fn enqueue(&self, code: &str, payload: serde_json::Value) -> Option<String> {
        let mut queues = self.queues.write().await;
        let queue = queues.get_mut(code)?;
        let id = uuid::Uuid::new_v4().to_string();
        queue.push(CommandEnvelope { id: id.clone(), payload, enqueued_at_ms: epoch_ms() });
        Some(id)
    }

    /// Take every pending command for `code`, leaving its queue empty.
    ///
    /// The swap happens under the write lock: a concurrent enqueue lands
    /// strictly before (delivered now) or strictly after (delivered on the
    /// next drain) — never both, never neither. Unknown devices drain to an
    /// empty vec rather than an error.
    pub async fn drain_all(&self, code: &str) -> Vec<CommandEnvelope> {
        let mut queues = self.queues.write().await;
        match queues.get_mut(code) {
            Some(queue) => std::mem::take(queue),
            None => Vec::new(),
        }
    }

    /// Remove the queue for `code` entirely, discarding pending commands.
    /// Returns how many were discarded.
    pub async fn drop_all(&self, code: &str) -> usize {
        self.queues.write().await.remove(code).map(|q| q.len()).unwrap_or(0)
    }

    /// Number of commands currently pending for `code`.
    pub async fn pending(&self, code: &str) -> usize {
        self.queues.read().await.get(code).map(Vec::len).unwrap_or(0)
    }
}

impl Default for CommandQueueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
