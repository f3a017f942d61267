// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Musterd: control-plane hub for a fleet of polling agents.
//!
//! Agents behind NAT cannot accept inbound connections, so everything is
//! outbound from their side: they enroll through a webhook, then
//! periodically poll to drain queued commands, each poll doubling as a
//! liveness heartbeat. The hub keeps all state in memory and rebuilds it
//! from agent traffic after a restart.

pub mod config;
pub mod directory;
pub mod error;
pub mod queue;
pub mod state;
pub mod sweep;
pub mod transport;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::HubConfig;
use crate::state::HubState;
use crate::sweep::spawn_sweeper;
use crate::transport::build_router;

/// Run the hub server until shutdown.
pub async fn run(config: HubConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let shutdown = CancellationToken::new();

    let state = Arc::new(HubState::new(config, shutdown.clone()));

    tracing::info!("musterd listening on {addr}");
    spawn_sweeper(Arc::clone(&state));

    let router = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;

    Ok(())
}
