// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the hub.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::directory::DeviceStatus;
use crate::error::HubError;
use crate::queue::CommandEnvelope;
use crate::state::{epoch_ms, HubState};

/// Framing tag agents put in front of their device code when enrolling.
const REGISTRATION_TAG: &str = "REGISTRATION:";

// -- Request/Response types ---------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub device_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub code: String,
    pub registered: bool,
}

#[derive(Debug, Serialize)]
pub struct DeviceInfo {
    pub code: String,
    pub status: DeviceStatus,
    pub last_seen_ms: u64,
    pub pending_commands: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub code: String,
    pub status: DeviceStatus,
    pub last_seen_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct EnqueueRequest {
    pub command: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct EnqueueResponse {
    pub command_id: String,
    pub queued: bool,
}

#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub commands: Vec<CommandEnvelope>,
}

// -- Handlers -----------------------------------------------------------------

/// `GET /api/v1/health`
pub async fn health(State(s): State<Arc<HubState>>) -> impl IntoResponse {
    Json(HealthResponse { status: "running".to_owned(), device_count: s.directory.count().await })
}

/// `POST /webhook/register` — agent enrollment.
pub async fn register_device(
    State(s): State<Arc<HubState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let Some(code) = parse_registration(&req.content) else {
        return HubError::InvalidFormat
            .to_http_response("missing or malformed registration token")
            .into_response();
    };

    match s.register_device(code).await {
        Ok(true) => {
            tracing::info!(device = %code, "device registered");
            Json(RegisterResponse { code: code.to_owned(), registered: true }).into_response()
        }
        Ok(false) => {
            tracing::debug!(device = %code, "device re-registered (heartbeat)");
            Json(RegisterResponse { code: code.to_owned(), registered: true }).into_response()
        }
        Err(e) => e.to_http_response(format!("invalid device code: {code}")).into_response(),
    }
}

/// `GET /api/v1/devices` — list all registered devices.
pub async fn list_devices(State(s): State<Arc<HubState>>) -> impl IntoResponse {
    let codes = s.directory.list().await;
    let mut list = Vec::with_capacity(codes.len());
    for code in codes {
        // Skip devices evicted since the snapshot was taken.
        let Some(presence) = s.directory.status_of(&code).await else { continue };
        let pending_commands = s.queues.pending(&code).await;
        list.push(DeviceInfo {
            code,
            status: presence.status,
            last_seen_ms: last_seen_epoch_ms(presence.last_seen),
            pending_commands,
        });
    }
    Json(list)
}

/// `GET /api/v1/devices/{code}/status` — derived presence for one device.
pub async fn device_status(
    State(s): State<Arc<HubState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match s.directory.status_of(&code).await {
        Some(presence) => Json(StatusResponse {
            code,
            status: presence.status,
            last_seen_ms: last_seen_epoch_ms(presence.last_seen),
        })
        .into_response(),
        None => HubError::NotFound.to_http_response("device not found").into_response(),
    }
}

/// `POST /api/v1/devices/{code}/commands` — console enqueue.
pub async fn enqueue_command(
    State(s): State<Arc<HubState>>,
    Path(code): Path<String>,
    Json(req): Json<EnqueueRequest>,
) -> impl IntoResponse {
    match s.enqueue_command(&code, req.command).await {
        Ok(command_id) => {
            tracing::info!(device = %code, command_id = %command_id, "command queued");
            Json(EnqueueResponse { command_id, queued: true }).into_response()
        }
        Err(e) => e.to_http_response("unknown device").into_response(),
    }
}

/// `POST /api/v1/devices/{code}/poll` — agent drain.
///
/// Always returns 200: an unknown or just-evicted device gets an empty
/// command list, not an error.
pub async fn poll_commands(
    State(s): State<Arc<HubState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    let commands = s.poll_device(&code).await;
    if commands.is_empty() {
        tracing::debug!(device = %code, "poll drained no commands");
    } else {
        tracing::info!(device = %code, count = commands.len(), "poll drained commands");
    }
    Json(PollResponse { commands })
}

// -- Helpers ------------------------------------------------------------------

/// Extract the device code from a raw registration body.
fn parse_registration(content: &str) -> Option<&str> {
    let code = content.strip_prefix(REGISTRATION_TAG)?.trim();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Convert a monotonic `last_seen` stamp to epoch millis for the wire.
fn last_seen_epoch_ms(last_seen: std::time::Instant) -> u64 {
    epoch_ms().saturating_sub(last_seen.elapsed().as_millis() as u64)
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
