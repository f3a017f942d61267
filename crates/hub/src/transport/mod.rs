// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the hub.

pub mod auth;
pub mod http;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::HubState;

/// Build the axum `Router` with all hub routes.
pub fn build_router(state: Arc<HubState>) -> Router {
    Router::new()
        // Health (no auth)
        .route("/api/v1/health", get(http::health))
        // Agent surface
        .route("/webhook/register", post(http::register_device))
        .route("/api/v1/devices/{code}/poll", post(http::poll_commands))
        // Console surface
        .route("/api/v1/devices", get(http::list_devices))
        .route("/api/v1/devices/{code}/status", get(http::device_status))
        .route("/api/v1/devices/{code}/commands", post(http::enqueue_command))
        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), auth::auth_layer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
