// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::{error_message, HubClient};

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let client = HubClient::new("http://127.0.0.1:5000/", None);
    assert_eq!(client.base(), "http://127.0.0.1:5000");
}

#[test]
fn base_url_without_slash_is_kept() {
    let client = HubClient::new("http://hub.internal:5000", None);
    assert_eq!(client.base(), "http://hub.internal:5000");
}

#[test]
fn error_message_reads_the_standard_envelope() {
    let body = json!({ "error": { "code": "DEVICE_UNKNOWN", "message": "unknown device" } });
    assert_eq!(error_message(&body), "unknown device");
}

#[test]
fn error_message_falls_back_to_raw_body() {
    let body = json!({ "weird": true });
    assert_eq!(error_message(&body), body.to_string());
}
