//! Request descriptors.
//!
//! A [`Resource`] names what to fetch: a URL plus, optionally, the method and
//! extra headers to send. Plain URLs and strings convert into a `GET`.
//!
//! ```rust
//! use progressive_fetch::Resource;
//! use reqwest::header::{HeaderValue, ACCEPT};
//!
//! # fn example() -> Result<(), progressive_fetch::Error> {
//! let wasm = Resource::try_from("https://example.com/app_bg.wasm")?
//!     .header(ACCEPT, HeaderValue::from_static("application/wasm"));
//! assert_eq!(wasm.url.path(), "/app_bg.wasm");
//! # Ok(())
//! # }
//! ```

use crate::error::Error;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::{Method, Url};

/// Represents a resource to fetch.
#[derive(Debug, Clone)]
pub struct Resource {
    /// URL of the resource.
    pub url: Url,
    /// HTTP method, `GET` unless set otherwise.
    pub method: Method,
    /// Headers sent on top of the client defaults.
    pub headers: HeaderMap,
}

impl Resource {
    /// Creates a `GET` [`Resource`] for `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: Method::GET,
            headers: HeaderMap::new(),
        }
    }

    /// Use `method` instead of `GET`.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a single request header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge a set of request headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

impl TryFrom<Url> for Resource {
    type Error = Error;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        match url.scheme() {
            "http" | "https" => Ok(Resource::new(url)),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" uses the unsupported scheme \"{}\"",
                url, scheme
            ))),
        }
    }
}

impl TryFrom<&Url> for Resource {
    type Error = Error;

    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        Resource::try_from(url.clone())
    }
}

impl TryFrom<&str> for Resource {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(Resource::try_from)
    }
}

impl TryFrom<String> for Resource {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Resource::try_from(value.as_str())
    }
}

impl TryFrom<&String> for Resource {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Resource::try_from(value.as_str())
    }
}
