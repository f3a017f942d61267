// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Configuration for the muster hub.
#[derive(Debug, Clone, clap::Parser)]
pub struct HubConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "MUSTER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000, env = "MUSTER_PORT")]
    pub port: u16,

    /// Bearer token for console API auth. If unset, auth is disabled.
    #[arg(long, env = "MUSTER_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Milliseconds without contact before a device reports offline.
    #[arg(long, default_value_t = 300_000, env = "MUSTER_ONLINE_WINDOW_MS")]
    pub online_window_ms: u64,

    /// Milliseconds without contact before a device is evicted outright.
    #[arg(long, default_value_t = 3_600_000, env = "MUSTER_EVICTION_WINDOW_MS")]
    pub eviction_window_ms: u64,

    /// Expiry sweep interval in milliseconds.
    #[arg(long, default_value_t = 300_000, env = "MUSTER_SWEEP_INTERVAL_MS")]
    pub sweep_interval_ms: u64,
}

impl HubConfig {
    pub fn online_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.online_window_ms)
    }

    pub fn eviction_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.eviction_window_ms)
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sweep_interval_ms)
    }
}
