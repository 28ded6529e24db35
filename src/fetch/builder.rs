//! Builder pattern implementation for creating Fetcher instances.
//!
//! ```rust
//! use progressive_fetch::FetcherBuilder;
//! use reqwest::header::{self, HeaderValue};
//! use std::time::Duration;
//!
//! let fetcher = FetcherBuilder::new()
//!     .header(header::USER_AGENT, HeaderValue::from_static("loader/1.0"))
//!     .connect_timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//! ```

use super::fetcher::Fetcher;
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::time::Duration;

/// A builder used to create a [`Fetcher`].
#[derive(Debug, Default)]
pub struct FetcherBuilder {
    config: HttpClientConfig,
}

impl FetcherBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        FetcherBuilder::default()
    }

    /// Route requests through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Limit the time spent establishing a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add default headers sent with every request.
    ///
    /// Calling `.headers()` several times merges all maps into one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add a single default header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();
        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// The client configuration collected so far.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Create the [`Fetcher`] with the specified options.
    pub fn build(self) -> Result<Fetcher> {
        let client = create_http_client(self.config)?;
        Ok(Fetcher::from_client(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, USER_AGENT};

    #[test]
    fn test_headers_are_merged() {
        let mut extra = HeaderMap::new();
        extra.insert(ACCEPT, HeaderValue::from_static("application/wasm"));

        let builder = FetcherBuilder::new()
            .header(USER_AGENT, HeaderValue::from_static("a"))
            .headers(extra);

        let headers = builder.config().headers.as_ref().unwrap();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "a");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/wasm");
    }

    #[test]
    fn test_build_default() {
        assert!(FetcherBuilder::new().build().is_ok());
    }
}
