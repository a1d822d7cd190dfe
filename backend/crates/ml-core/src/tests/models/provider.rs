use crate::Provider;

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_known_tag_when_parsed_then_returns_provider() {
    assert_that!(Provider::from_str("spotify").unwrap(), eq(Provider::Spotify));
}

#[test]
fn given_unknown_tag_when_parsed_then_invalid_provider_error() {
    let result = Provider::from_str("lastfm");

    assert_that!(result, err(anything()));
    assert!(result.unwrap_err().to_string().contains("lastfm"));
}

#[test]
fn given_provider_when_displayed_then_matches_stored_tag() {
    assert_that!(Provider::Spotify.to_string(), eq("spotify"));
    assert_that!(Provider::Spotify.as_str(), eq("spotify"));
}
