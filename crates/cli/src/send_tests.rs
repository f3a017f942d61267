// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::parse_payload;

#[test]
fn structured_json_payloads_pass_through() {
    assert_eq!(
        parse_payload(r#"{"action":"reboot","delay":5}"#),
        json!({"action":"reboot","delay":5})
    );
    assert_eq!(parse_payload("[1, 2, 3]"), json!([1, 2, 3]));
    assert_eq!(parse_payload("42"), json!(42));
}

#[test]
fn quoted_strings_stay_strings() {
    assert_eq!(parse_payload(r#""reboot""#), json!("reboot"));
}

#[test]
fn bare_words_become_strings() {
    assert_eq!(parse_payload("reboot"), json!("reboot"));
    assert_eq!(parse_payload("shutdown -r now"), json!("shutdown -r now"));
}
