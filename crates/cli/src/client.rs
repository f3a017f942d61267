// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking HTTP client for the hub's console API.

use anyhow::Context;
use serde_json::Value;

/// Console-side client for the muster hub.
pub struct HubClient {
    base: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl HubClient {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        Self {
            base,
            token,
            http: reqwest::blocking::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Base URL of the hub, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// GET `path`, returning the HTTP status and parsed JSON body.
    pub fn get_json(&self, path: &str) -> anyhow::Result<(reqwest::StatusCode, Value)> {
        let mut req = self.http.get(format!("{}{path}", self.base));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.json().unwrap_or(Value::Null);
        Ok((status, body))
    }

    /// POST a JSON `body` to `path`, returning the HTTP status and parsed
    /// JSON response.
    pub fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> anyhow::Result<(reqwest::StatusCode, Value)> {
        let mut req = self.http.post(format!("{}{path}", self.base)).json(body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.json().unwrap_or(Value::Null);
        Ok((status, body))
    }
}

/// Pull the hub's error message out of a response body, falling back to the
/// raw body when it is not the standard envelope.
pub fn error_message(body: &Value) -> String {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
