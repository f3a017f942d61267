// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registered-device directory: enrollment and liveness tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::HubError;

/// Required device-code prefix.
pub const CODE_PREFIX: &str = "PC";

/// Minimum accepted device-code length, prefix included.
pub const MIN_CODE_LEN: usize = 8;

/// A single registered device.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub code: String,
    pub last_seen: Instant,
}

/// Derived presence for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// One device's presence as reported to status queries.
#[derive(Debug, Clone, Copy)]
pub struct Presence {
    pub status: DeviceStatus,
    pub last_seen: Instant,
}

/// Directory of registered devices.
///
/// `last_seen` is the single source of truth for presence: the
/// online/offline probe and the sweeper's eviction probe both derive from
/// it, and no stored status field exists to drift out of date.
pub struct DeviceDirectory {
    devices: RwLock<HashMap<String, DeviceRecord>>,
    online_window: Duration,
}

impl DeviceDirectory {
    pub fn new(online_window: Duration) -> Self {
        Self { devices: RwLock::new(HashMap::new()), online_window }
    }

    /// Whether `code` is an acceptable device code: `PC`-prefixed and at
    /// least [`MIN_CODE_LEN`] characters.
    pub fn valid_code(code: &str) -> bool {
        code.starts_with(CODE_PREFIX) && code.len() >= MIN_CODE_LEN
    }

    /// Register `code`, refreshing `last_seen` if it is already known.
    ///
    /// Returns `true` when the device is new. Re-registration is an agent
    /// heartbeat, not an error.
    pub async fn register(&self, code: &str) -> Result<bool, HubError> {
        if !Self::valid_code(code) {
            return Err(HubError::InvalidFormat);
        }
        let mut devices = self.devices.write().await;
        match devices.get_mut(code) {
            Some(record) => {
                record.last_seen = Instant::now();
                Ok(false)
            }
            None => {
                devices.insert(
                    code.to_owned(),
                    DeviceRecord { code: code.to_owned(), last_seen: Instant::now() },
                );
                Ok(true)
            }
        }
    }

    /// Refresh `last_seen` for an already-registered device (the poll path).
    ///
    /// Fails with `NotFound` when `code` is not currently registered — it
    /// may have been evicted since its last contact.
    pub async fn touch(&self, code: &str) -> Result<(), HubError> {
        let mut devices = self.devices.write().await;
        match devices.get_mut(code) {
            Some(record) => {
                record.last_seen = Instant::now();
                Ok(())
            }
            None => Err(HubError::NotFound),
        }
    }

    /// Derived presence for `code`, or `None` if it was never registered or
    /// has been evicted.
    pub async fn status_of(&self, code: &str) -> Option<Presence> {
        let devices = self.devices.read().await;
        devices.get(code).map(|record| Presence {
            status: if record.last_seen.elapsed() < self.online_window {
                DeviceStatus::Online
            } else {
                DeviceStatus::Offline
            },
            last_seen: record.last_seen,
        })
    }

    /// Whether `code` is currently registered.
    pub async fn contains(&self, code: &str) -> bool {
        self.devices.read().await.contains_key(code)
    }

    /// Snapshot of all registered codes.
    pub async fn list(&self) -> Vec<String> {
        self.devices.read().await.keys().cloned().collect()
    }

    /// Number of registered devices.
    pub async fn count(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Remove `code` unconditionally. Returns `true` if it was present.
    pub async fn evict(&self, code: &str) -> bool {
        self.devices.write().await.remove(code).is_some()
    }

    /// Remove `code` only if it is still idle past `window` at removal time.
    ///
    /// The recheck runs under the write lock, so a heartbeat that lands
    /// after the sweeper's scan snapshot keeps its device registered.
    pub async fn evict_if_idle(&self, code: &str, window: Duration) -> bool {
        let mut devices = self.devices.write().await;
        match devices.get(code) {
            Some(record) if record.last_seen.elapsed() > window => {
                devices.remove(code);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
