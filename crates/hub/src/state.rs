// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tokio_util::sync::CancellationToken;

use crate::config::HubConfig;
use crate::directory::DeviceDirectory;
use crate::error::HubError;
use crate::queue::{CommandEnvelope, CommandQueueStore};

/// Shared hub state: the device directory, the pending-command store, and
/// process-wide config/shutdown.
///
/// Operations that touch both stores live here so the invariant holds: a
/// directory record exists exactly when its command queue does.
pub struct HubState {
    pub directory: DeviceDirectory,
    pub queues: CommandQueueStore,
    pub config: HubConfig,
    pub shutdown: CancellationToken,
}

impl HubState {
    pub fn new(config: HubConfig, shutdown: CancellationToken) -> Self {
        Self {
            directory: DeviceDirectory::new(config.online_window()),
            queues: CommandQueueStore::new(),
            config,
            shutdown,
        }
    }

    /// Register a device, creating its directory record and its command
    /// queue together. Returns `true` for a first registration, `false` for
    /// a heartbeat re-registration.
    pub async fn register_device(&self, code: &str) -> Result<bool, HubError> {
        let is_new = self.directory.register(code).await?;
        self.queues.create(code).await;
        Ok(is_new)
    }

    /// Queue a command for a registered device, returning the envelope id.
    ///
    /// Offline devices remain valid targets: a temporarily unreachable
    /// agent picks its backlog up on its next poll.
    pub async fn enqueue_command(
        &self,
        code: &str,
        payload: serde_json::Value,
    ) -> Result<String, HubError> {
        if !self.directory.contains(code).await {
            return Err(HubError::DeviceUnknown);
        }
        // The queue may already be mid-eviction; refusing here keeps the
        // directory and the store in lockstep.
        self.queues.enqueue(code, payload).await.ok_or(HubError::DeviceUnknown)
    }

    /// Agent poll: refresh presence, then atomically drain the queue.
    ///
    /// An unknown (possibly just-evicted) device drains to an empty list so
    /// agents racing their own eviction need no special casing.
    pub async fn poll_device(&self, code: &str) -> Vec<CommandEnvelope> {
        if self.directory.touch(code).await.is_err() {
            return Vec::new();
        }
        self.queues.drain_all(code).await
    }

    /// Sweep path: evict `code` only if it is still idle past the eviction
    /// window, cascading removal into the command queue store.
    pub async fn evict_idle(&self, code: &str) -> bool {
        if !self.directory.evict_if_idle(code, self.config.eviction_window()).await {
            return false;
        }
        let dropped = self.queues.drop_all(code).await;
        if dropped > 0 {
            tracing::debug!(device = %code, discarded = dropped, "dropped pending commands for evicted device");
        }
        true
    }
}

/// Return current epoch millis.
pub fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
