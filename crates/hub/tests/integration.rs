// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-level tests for the coordination core: drain atomicity and
//! concurrent enqueue/drain behavior.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use musterd::config::HubConfig;
use musterd::state::HubState;

const DEVICE: &str = "PCAB12345";

fn quiet_config() -> HubConfig {
    // Windows far larger than any test runtime, so presence never interferes.
    HubConfig {
        host: "127.0.0.1".into(),
        port: 0,
        auth_token: None,
        online_window_ms: 60_000,
        eviction_window_ms: 3_600_000,
        sweep_interval_ms: 300_000,
    }
}

#[tokio::test]
async fn drain_returns_everything_exactly_once() -> anyhow::Result<()> {
    let state = HubState::new(quiet_config(), CancellationToken::new());
    state.register_device(DEVICE).await?;

    for i in 0..5 {
        state.enqueue_command(DEVICE, serde_json::json!(i)).await?;
    }

    let first = state.poll_device(DEVICE).await;
    assert_eq!(first.len(), 5);
    assert!(state.poll_device(DEVICE).await.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_enqueue_and_drain_never_loses_or_duplicates() -> anyhow::Result<()> {
    const TOTAL: u64 = 200;

    let state = Arc::new(HubState::new(quiet_config(), CancellationToken::new()));
    state.register_device(DEVICE).await?;

    let producer = {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            for i in 0..TOTAL {
                // The device cannot disappear in this test.
                let _ = state.enqueue_command(DEVICE, serde_json::json!(i)).await;
                if i % 16 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    let consumer = {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let mut drained = Vec::new();
            // Bounded so a lost command fails the assertion instead of
            // hanging the test.
            for _ in 0..100_000 {
                drained.extend(state.poll_device(DEVICE).await);
                if drained.len() as u64 >= TOTAL {
                    break;
                }
                tokio::task::yield_now().await;
            }
            drained
        })
    };

    producer.await?;
    let drained = consumer.await?;

    // Single producer + FIFO queues: the concatenation of all drains must be
    // exactly the enqueue sequence — nothing lost, nothing duplicated,
    // nothing reordered.
    let payloads: Vec<u64> =
        drained.iter().filter_map(|envelope| envelope.payload.as_u64()).collect();
    assert_eq!(payloads, (0..TOTAL).collect::<Vec<u64>>());

    let ids: HashSet<&str> = drained.iter().map(|envelope| envelope.id.as_str()).collect();
    assert_eq!(ids.len(), drained.len());
    Ok(())
}
