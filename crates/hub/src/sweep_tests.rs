// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{spawn_sweeper, sweep_once};
use crate::config::HubConfig;
use crate::directory::DeviceStatus;
use crate::error::HubError;
use crate::state::HubState;

fn test_config() -> HubConfig {
    HubConfig {
        host: "127.0.0.1".into(),
        port: 0,
        auth_token: None,
        online_window_ms: 50,
        eviction_window_ms: 100,
        sweep_interval_ms: 25,
    }
}

fn test_state() -> HubState {
    HubState::new(test_config(), CancellationToken::new())
}

#[tokio::test]
async fn sweep_evicts_idle_device_and_its_queue() -> anyhow::Result<()> {
    let state = test_state();
    state.register_device("PCAB12345").await?;
    state.enqueue_command("PCAB12345", json!("reboot")).await?;

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(sweep_once(&state).await, 1);

    assert!(state.directory.status_of("PCAB12345").await.is_none());
    assert_eq!(
        state.enqueue_command("PCAB12345", json!("reboot")).await,
        Err(HubError::DeviceUnknown)
    );
    Ok(())
}

#[tokio::test]
async fn sweep_spares_devices_inside_the_window() -> anyhow::Result<()> {
    let state = test_state();
    state.register_device("PCAB12345").await?;

    assert_eq!(sweep_once(&state).await, 0);
    assert!(state.directory.contains("PCAB12345").await);
    Ok(())
}

#[tokio::test]
async fn offline_devices_stay_registered_until_eviction() -> anyhow::Result<()> {
    let state = test_state();
    state.register_device("PCAB12345").await?;

    // Past the online window, inside the eviction window.
    tokio::time::sleep(Duration::from_millis(70)).await;
    assert_eq!(sweep_once(&state).await, 0);

    let presence = state.directory.status_of("PCAB12345").await.ok_or(HubError::NotFound)?;
    assert_eq!(presence.status, DeviceStatus::Offline);

    // Still listed, still a valid enqueue target.
    assert!(state.directory.list().await.contains(&"PCAB12345".to_owned()));
    assert!(state.enqueue_command("PCAB12345", json!("wake")).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn evicted_code_may_re_register_fresh() -> anyhow::Result<()> {
    let state = test_state();
    state.register_device("PCAB12345").await?;
    state.enqueue_command("PCAB12345", json!("stale")).await?;

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(sweep_once(&state).await, 1);

    // Re-registration creates a fresh record with an empty queue.
    assert!(state.register_device("PCAB12345").await?);
    let presence = state.directory.status_of("PCAB12345").await.ok_or(HubError::NotFound)?;
    assert_eq!(presence.status, DeviceStatus::Online);
    assert!(state.poll_device("PCAB12345").await.is_empty());
    Ok(())
}

#[tokio::test]
async fn background_sweeper_reclaims_and_stops_on_shutdown() -> anyhow::Result<()> {
    let state = Arc::new(test_state());
    state.register_device("PCAB12345").await?;

    spawn_sweeper(Arc::clone(&state));
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(state.directory.status_of("PCAB12345").await.is_none());

    state.shutdown.cancel();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // With the sweeper stopped, idle devices are no longer reclaimed.
    state.register_device("PCCD67890").await?;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(state.directory.contains("PCCD67890").await);
    Ok(())
}
