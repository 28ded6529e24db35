//! HTTP module containing client construction.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//!
//! Content length parsing lives in [`crate::utils::content_length`].

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
