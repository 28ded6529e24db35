//! progressive-fetch streams HTTP response bodies through byte-counting
//! progress hooks, so a front end can draw a progress bar while a large asset
//! (a WebAssembly binary, say) downloads.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use progressive_fetch::{Fetcher, ProgressCallbacks, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let callbacks = ProgressCallbacks::new()
//!     .on_start(|total| println!("downloading {:?} bytes", total))
//!     .on_update(|loaded, _| println!("{} bytes so far", loaded))
//!     .on_finish(|_| println!("done"));
//!
//! let response = Fetcher::new()?
//!     .fetch_with_progress("https://example.com/app_bg.wasm", callbacks)
//!     .await?;
//! let wasm = response.bytes().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`fetch`] - The counting body tap, responses, and the `Fetcher`
//! - [`progress`] - Progress widgets bound to fetches, rendered as elements or terminal bars
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`utils`] - Shared utility functions

pub mod error;
pub mod fetch;
pub mod http;
pub mod progress;
pub mod utils;

pub use error::{Error, Result};
pub use fetch::{
    fetch_with_progress, FetchSession, Fetcher, FetcherBuilder, ProgressCallbacks,
    ProgressResponse, ProgressStream, Resource, SessionPhase,
};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarController, ProgressBarOpts, StatusView, TerminalStatus, HIDE_DELAY};
pub use utils::content_length::declared_content_length;
