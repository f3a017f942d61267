// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `muster register` — perform a single enrollment call for a device code.
//!
//! Useful for smoke-testing a hub without running a full agent loop.

use crate::client::{error_message, HubClient};

/// Run the `muster register` subcommand. Returns a process exit code.
pub fn run(client: &HubClient, code: &str) -> i32 {
    let body = serde_json::json!({ "content": format!("REGISTRATION:{code}") });
    let (status, resp) = match client.post_json("/webhook/register", &body) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    if status == reqwest::StatusCode::BAD_REQUEST {
        eprintln!("error: {}", error_message(&resp));
        return 2;
    }
    if !status.is_success() {
        eprintln!("error: hub returned {status}: {}", error_message(&resp));
        return 1;
    }

    println!("registered {}", resp["code"].as_str().unwrap_or(code));
    0
}
