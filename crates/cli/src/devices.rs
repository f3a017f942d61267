// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `muster devices` — list registered devices.

use crate::client::{error_message, HubClient};

/// Run the `muster devices` subcommand. Returns a process exit code.
pub fn run(client: &HubClient) -> i32 {
    let (status, body) = match client.get_json("/api/v1/devices") {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    if !status.is_success() {
        eprintln!("error: hub returned {status}: {}", error_message(&body));
        return 1;
    }

    let devices = body.as_array().cloned().unwrap_or_default();
    if devices.is_empty() {
        println!("no devices registered");
        return 0;
    }
    for device in &devices {
        println!(
            "{}  {}  pending={}",
            device["code"].as_str().unwrap_or("?"),
            device["status"].as_str().unwrap_or("?"),
            device["pending_commands"].as_u64().unwrap_or(0),
        );
    }
    0
}
