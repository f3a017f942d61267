// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::CommandQueueStore;

#[tokio::test]
async fn enqueue_without_queue_is_refused() {
    let store = CommandQueueStore::new();
    assert!(store.enqueue("PCAB12345", json!("reboot")).await.is_none());
}

#[tokio::test]
async fn drain_preserves_fifo_order_and_empties() {
    let store = CommandQueueStore::new();
    store.create("PCAB12345").await;

    for payload in ["p1", "p2", "p3"] {
        assert!(store.enqueue("PCAB12345", json!(payload)).await.is_some());
    }

    let drained = store.drain_all("PCAB12345").await;
    let payloads: Vec<_> = drained.iter().map(|e| e.payload.clone()).collect();
    assert_eq!(payloads, vec![json!("p1"), json!("p2"), json!("p3")]);

    // A second immediate drain sees nothing.
    assert!(store.drain_all("PCAB12345").await.is_empty());
}

#[tokio::test]
async fn drain_unknown_is_empty_not_an_error() {
    let store = CommandQueueStore::new();
    assert!(store.drain_all("PCNOPE123").await.is_empty());
}

#[tokio::test]
async fn envelope_ids_are_unique() {
    let store = CommandQueueStore::new();
    store.create("PCAB12345").await;

    let a = store.enqueue("PCAB12345", json!(1)).await;
    let b = store.enqueue("PCAB12345", json!(2)).await;
    assert!(a.is_some());
    assert!(b.is_some());
    assert_ne!(a, b);
}

#[tokio::test]
async fn create_is_idempotent_and_keeps_pending() {
    let store = CommandQueueStore::new();
    store.create("PCAB12345").await;
    store.enqueue("PCAB12345", json!("reboot")).await;

    store.create("PCAB12345").await;
    assert_eq!(store.pending("PCAB12345").await, 1);
}

#[tokio::test]
async fn drop_all_discards_and_forgets_the_queue() {
    let store = CommandQueueStore::new();
    store.create("PCAB12345").await;
    store.enqueue("PCAB12345", json!("a")).await;
    store.enqueue("PCAB12345", json!("b")).await;

    assert_eq!(store.drop_all("PCAB12345").await, 2);
    assert_eq!(store.pending("PCAB12345").await, 0);

    // The queue itself is gone, not just empty.
    assert!(store.enqueue("PCAB12345", json!("c")).await.is_none());
}
