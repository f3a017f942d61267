// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `muster send` — queue a command payload for a device.
//!
//! The payload argument is parsed as JSON when possible; anything else is
//! sent as a plain string, so `muster send PCAB12345 reboot` works without
//! quoting gymnastics.

use crate::client::{error_message, HubClient};

/// Run the `muster send` subcommand. Returns a process exit code.
pub fn run(client: &HubClient, code: &str, payload_arg: &str) -> i32 {
    let payload = parse_payload(payload_arg);
    let body = serde_json::json!({ "command": payload });

    let (status, resp) = match client.post_json(&format!("/api/v1/devices/{code}/commands"), &body)
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    if !status.is_success() {
        eprintln!("error: hub returned {status}: {}", error_message(&resp));
        return 1;
    }

    println!("queued {}", resp["command_id"].as_str().unwrap_or("?"));
    0
}

/// Parse the payload argument: JSON if it parses, a bare string otherwise.
fn parse_payload(arg: &str) -> serde_json::Value {
    serde_json::from_str(arg).unwrap_or_else(|_| serde_json::Value::String(arg.to_owned()))
}

#[cfg(test)]
#[path = "send_tests.rs"]
mod tests;
