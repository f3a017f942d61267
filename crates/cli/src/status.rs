// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `muster status` — one device's presence.

use crate::client::{error_message, HubClient};

/// Run the `muster status` subcommand. Returns a process exit code.
pub fn run(client: &HubClient, code: &str) -> i32 {
    let (status, body) = match client.get_json(&format!("/api/v1/devices/{code}/status")) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    if status == reqwest::StatusCode::NOT_FOUND {
        eprintln!("device not found: {code}");
        return 1;
    }
    if !status.is_success() {
        eprintln!("error: hub returned {status}: {}", error_message(&body));
        return 1;
    }

    let ago_ms = epoch_ms().saturating_sub(body["last_seen_ms"].as_u64().unwrap_or(0));
    println!(
        "{}  {}  last contact {}s ago",
        body["code"].as_str().unwrap_or(code),
        body["status"].as_str().unwrap_or("?"),
        ago_ms / 1000,
    );
    0
}

fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
