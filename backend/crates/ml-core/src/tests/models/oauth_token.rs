use crate::OAuthToken;

use chrono::{TimeZone, Utc};
use googletest::prelude::*;

#[test]
fn given_token_when_debug_formatted_then_secrets_are_redacted() {
    let mut token = OAuthToken::bearer("super-secret-access");
    token.refresh_token = Some("super-secret-refresh".to_string());

    let rendered = format!("{token:?}");

    assert!(!rendered.contains("super-secret-access"));
    assert!(!rendered.contains("super-secret-refresh"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn given_go_style_token_json_when_parsed_then_fields_are_populated() {
    let json = r#"{
        "access_token": "abc",
        "token_type": "Bearer",
        "refresh_token": "def",
        "expiry": "2023-03-01T12:00:00Z"
    }"#;

    let token = OAuthToken::from_json(json).unwrap();

    assert_that!(token.access_token, eq("abc"));
    assert_eq!(token.refresh_token.as_deref(), Some("def"));
    assert_eq!(
        token.expiry,
        Some(Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap())
    );
}

#[test]
fn given_minimal_json_when_parsed_then_defaults_to_bearer() {
    let token = OAuthToken::from_json(r#"{"access_token":"abc"}"#).unwrap();

    assert_that!(token.token_type, eq("Bearer"));
    assert!(token.refresh_token.is_none());
}

#[test]
fn given_malformed_json_when_parsed_then_credentials_error() {
    assert_that!(OAuthToken::from_json("not json"), err(anything()));
}
