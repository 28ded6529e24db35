//! Error handling for progressive-fetch.
//!
//! Transport failures are never translated: the `reqwest` or middleware error
//! is kept as the `source` of the returned [`Error`], so callers can inspect
//! exactly what the network layer reported.

use thiserror::Error;

/// Errors that can happen when fetching with progress.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Used for failures that don't fit the other categories, such as an
    /// element tree operation that would leave the tree inconsistent.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the URL parser or an unsupported URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The element a progress bar should be attached to does not exist.
    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    /// The server answered with a client or server error status.
    ///
    /// Only produced by [`ProgressResponse::error_for_status`]; fetching never
    /// treats a status code as a failure on its own.
    ///
    /// [`ProgressResponse::error_for_status`]: crate::ProgressResponse::error_for_status
    #[error("HTTP status {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: reqwest::Url,
    },

    /// Error from the Reqwest library.
    ///
    /// Covers connection failures before the response headers arrive as well
    /// as failures while reading the body stream.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the middleware stack wrapping the HTTP client.
    #[error("Middleware Error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Result type alias for operations that can fail with a progressive-fetch error.
pub type Result<T> = std::result::Result<T, Error>;
