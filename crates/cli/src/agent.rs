// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `muster agent` — a long-lived polling agent.
//!
//! Enrolls its device code with the hub (retrying with backoff while the
//! hub comes up), then drains queued commands on a fixed interval. Every
//! poll doubles as a liveness heartbeat, so a quiet agent stays registered
//! as long as the loop runs. Drained payloads are printed to stdout, one
//! line per command — executing them is someone else's job.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Run the `muster agent` subcommand. Returns a process exit code.
pub fn run(base: &str, code: &str, interval_secs: u64) -> i32 {
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return 1;
        }
    };

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        rt.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    let base = base.trim_end_matches('/').to_owned();
    rt.block_on(poll_loop(&base, code, Duration::from_secs(interval_secs), shutdown))
}

/// Enroll, then poll until shutdown.
async fn poll_loop(base: &str, code: &str, interval: Duration, shutdown: CancellationToken) -> i32 {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default();

    // Enroll with retries (quiet — the hub may not be running yet).
    let mut enrolled = false;
    for attempt in 0..5u32 {
        if shutdown.is_cancelled() {
            return 0;
        }
        match enroll(&http, base, code).await {
            Ok(()) => {
                info!(hub = %base, device = %code, "enrolled with hub");
                enrolled = true;
                break;
            }
            Err(e) => {
                let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                debug!(
                    hub = %base,
                    attempt = attempt + 1,
                    err = %e,
                    "enrollment attempt failed, retrying in {:?}",
                    delay,
                );
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown.cancelled() => return 0,
                }
            }
        }
    }
    if !enrolled {
        eprintln!("error: could not enroll with hub at {base}");
        return 1;
    }

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.cancelled() => break,
        }
        match poll(&http, base, code).await {
            Ok(commands) => {
                for command in &commands {
                    println!("{} {}", command["id"].as_str().unwrap_or("?"), command["payload"]);
                }
            }
            Err(e) => {
                warn!(hub = %base, err = %e, "poll failed");
            }
        }
    }

    info!(device = %code, "agent stopped");
    0
}

async fn enroll(http: &reqwest::Client, base: &str, code: &str) -> anyhow::Result<()> {
    let resp = http
        .post(format!("{base}/webhook/register"))
        .json(&serde_json::json!({ "content": format!("REGISTRATION:{code}") }))
        .send()
        .await?;
    if !resp.status().is_success() {
        anyhow::bail!("hub rejected enrollment: {}", resp.status());
    }
    Ok(())
}

async fn poll(http: &reqwest::Client, base: &str, code: &str) -> anyhow::Result<Vec<Value>> {
    let resp = http
        .post(format!("{base}/api/v1/devices/{code}/poll"))
        .send()
        .await?
        .error_for_status()?;
    let body: Value = resp.json().await?;
    Ok(body.get("commands").and_then(|v| v.as_array()).cloned().unwrap_or_default())
}
