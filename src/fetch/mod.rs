//! Fetching with byte-level progress.
//!
//! - `callbacks` - The [`ProgressCallbacks`] hook record
//! - `stream` - [`ProgressStream`], the counting tap, and its [`FetchSession`]
//! - `resource` - [`Resource`] request descriptors
//! - `response` - [`ProgressResponse`], a response with a tapped body
//! - `fetcher` / `builder` - [`Fetcher`] and [`FetcherBuilder`]

pub mod builder;
pub mod callbacks;
pub mod fetcher;
pub mod resource;
pub mod response;
pub mod stream;

pub use builder::FetcherBuilder;
pub use callbacks::ProgressCallbacks;
pub use fetcher::{fetch_with_progress, Fetcher};
pub use resource::Resource;
pub use response::{BodyStream, ProgressResponse};
pub use stream::{FetchSession, ProgressStream, SessionPhase};
