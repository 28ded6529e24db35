//! Content length extraction utilities.
//!
//! The declared size of a body is read straight from the `Content-Length`
//! header. A missing or garbled header means the total is unknown; there is no
//! fallback estimation.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Read the declared body size from a header map.
///
/// Returns `None` if the header is absent, not valid ASCII, or not an u64.
///
/// # Example
///
/// ```rust
/// use progressive_fetch::utils::declared_content_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// assert_eq!(declared_content_length(&headers), None);
///
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("1000"));
/// assert_eq!(declared_content_length(&headers), Some(1000));
/// ```
pub fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| parse_content_length(value))
}

/// Parse a `Content-Length` header value.
///
/// Surrounding whitespace is tolerated; signs, fractions and lists are not.
pub fn parse_content_length(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok()
}
