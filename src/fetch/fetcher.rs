//! Core fetch implementation.
//!
//! The [`Fetcher`] sends a request, waits for the response headers, reads the
//! declared content length and hands back a [`ProgressResponse`] whose body is
//! tapped by a [`ProgressStream`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use progressive_fetch::{Fetcher, ProgressCallbacks};
//!
//! # async fn example() -> Result<(), progressive_fetch::Error> {
//! let fetcher = Fetcher::new()?;
//! let callbacks = ProgressCallbacks::new().on_update(|loaded, total| {
//!     if let Some(total) = total {
//!         println!("{:.1}%", 100.0 * loaded as f64 / total as f64);
//!     }
//! });
//!
//! let response = fetcher
//!     .fetch_with_progress("https://example.com/app_bg.wasm", callbacks)
//!     .await?;
//! let wasm = response.bytes().await?;
//! # Ok(())
//! # }
//! ```

use super::builder::FetcherBuilder;
use super::callbacks::ProgressCallbacks;
use super::resource::Resource;
use super::response::ProgressResponse;
use super::stream::ProgressStream;
use crate::error::{Error, Result};
use crate::utils::content_length::declared_content_length;

use futures::StreamExt;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// Sends requests and instruments their response bodies.
///
/// A fetcher can be created via its builder:
///
/// ```rust
/// use progressive_fetch::FetcherBuilder;
///
/// let fetcher = FetcherBuilder::new().build().unwrap();
/// ```
#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Creates a fetcher with the default client configuration.
    pub fn new() -> Result<Self> {
        FetcherBuilder::new().build()
    }

    /// Creates a fetcher around an existing middleware client.
    pub fn from_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Fetch `resource`, reporting body progress through `callbacks`.
    ///
    /// Resolves once the response headers have arrived. `on_start` has fired
    /// by then; the remaining hooks fire as the returned body is read.
    ///
    /// If the request cannot be sent (bad URL, DNS or connection failure) the
    /// error is returned and no hook fires at all.
    pub async fn fetch_with_progress<R>(
        &self,
        resource: R,
        callbacks: ProgressCallbacks,
    ) -> Result<ProgressResponse>
    where
        R: TryInto<Resource>,
        Error: From<R::Error>,
    {
        let resource: Resource = resource.try_into()?;

        debug!("Fetching {}", &resource.url);
        let res = self
            .client
            .request(resource.method, resource.url)
            .headers(resource.headers)
            .send()
            .await?;

        let total = declared_content_length(res.headers());
        debug!(status = %res.status(), ?total, "Response headers received");

        let status = res.status();
        let version = res.version();
        let headers = res.headers().clone();
        let url = res.url().clone();
        let body = ProgressStream::new(res.bytes_stream().boxed(), total, callbacks);

        Ok(ProgressResponse::new(status, version, headers, url, body))
    }
}

/// Fetch `resource` with a default [`Fetcher`].
///
/// Builds a fresh client on every call; keep a [`Fetcher`] around when making
/// several requests.
pub async fn fetch_with_progress<R>(
    resource: R,
    callbacks: ProgressCallbacks,
) -> Result<ProgressResponse>
where
    R: TryInto<Resource>,
    Error: From<R::Error>,
{
    Fetcher::new()?.fetch_with_progress(resource, callbacks).await
}
