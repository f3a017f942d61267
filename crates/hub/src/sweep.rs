// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background expiry sweep for idle devices.

use std::sync::Arc;

use crate::state::HubState;

/// Spawn a single background task that periodically reclaims devices idle
/// past the eviction window.
pub fn spawn_sweeper(state: Arc<HubState>) {
    let interval = state.config.sweep_interval();

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => {
                    tracing::debug!("expiry sweeper stopped");
                    break;
                }
                _ = timer.tick() => {}
            }

            let evicted = sweep_once(&state).await;
            if evicted > 0 {
                tracing::debug!(evicted, "expiry sweep complete");
            }
        }
    });
}

/// One full scan: evict every device idle past the eviction window.
///
/// Devices past the online window but inside the eviction window are left
/// in place — they report offline but keep their record and queue. Eviction
/// rechecks idleness under the directory's write lock, so a heartbeat that
/// lands after the scan snapshot wins.
pub async fn sweep_once(state: &HubState) -> usize {
    let mut evicted = 0;
    for code in state.directory.list().await {
        if state.evict_idle(&code).await {
            tracing::info!(device = %code, "evicted idle device");
            evicted += 1;
        }
    }
    evicted
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
