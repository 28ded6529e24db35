//! Tests for utility functions.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};

use progressive_fetch::utils::{declared_content_length, parse_content_length};

#[test]
fn test_declared_content_length_cases() {
    let cases: Vec<(&'static str, Option<u64>)> = vec![
        ("1000", Some(1000)),
        ("0", Some(0)),
        (" 42", Some(42)),
        ("", None),
        ("1e3", None),
        ("-5", None),
    ];

    for (value, expected) in cases {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static(value));
        assert_eq!(declared_content_length(&headers), expected, "{:?}", value);
        assert_eq!(parse_content_length(value), expected, "{:?}", value);
    }
}

#[test]
fn test_declared_content_length_absent() {
    assert_eq!(declared_content_length(&HeaderMap::new()), None);
}
