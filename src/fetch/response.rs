//! Responses with an instrumented body.
//!
//! A [`ProgressResponse`] carries the status line and headers of the original
//! response untouched. Its body is a [`ProgressStream`], so reading it in any
//! way (chunk by chunk, as a stream, or buffered) drives the progress hooks.

use super::stream::{FetchSession, ProgressStream};
use crate::error::{Error, Result};

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url, Version};

/// The raw body stream of a response, boxed so it can be named.
pub type BodyStream = BoxStream<'static, reqwest::Result<Bytes>>;

/// Largest buffer [`ProgressResponse::bytes`] reserves up front from a
/// declared content length.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// A response whose body reports progress while it is read.
#[derive(Debug)]
pub struct ProgressResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Url,
    body: ProgressStream<BodyStream>,
}

impl ProgressResponse {
    pub(crate) fn new(
        status: StatusCode,
        version: Version,
        headers: HeaderMap,
        url: Url,
        body: ProgressStream<BodyStream>,
    ) -> Self {
        Self {
            status,
            version,
            headers,
            url,
            body,
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// HTTP version of the response.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Response headers, exactly as received.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the response, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Body size declared by the `Content-Length` header.
    pub fn content_length(&self) -> Option<u64> {
        self.body.session().total()
    }

    /// Byte accounting of the body read so far.
    pub fn session(&self) -> &FetchSession {
        self.body.session()
    }

    /// Turn a 4xx or 5xx status into an [`Error::HttpStatus`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(Error::HttpStatus {
                status: self.status,
                url: self.url,
            })
        } else {
            Ok(self)
        }
    }

    /// Read the next chunk of the body, or `None` at the end.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        match self.body.next().await {
            Some(chunk) => Ok(Some(chunk?)),
            None => Ok(None),
        }
    }

    /// Read the whole body into memory.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let capacity = self.content_length().unwrap_or(0).min(MAX_PREALLOCATION);
        let mut buffer = BytesMut::with_capacity(capacity as usize);
        while let Some(chunk) = self.chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.freeze())
    }

    /// Convert the response into its instrumented body stream.
    pub fn bytes_stream(self) -> ProgressStream<BodyStream> {
        self.body
    }
}
