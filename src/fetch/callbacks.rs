//! Progress callback hooks.
//!
//! [`ProgressCallbacks`] holds one function per lifecycle event of a fetch.
//! Every hook starts out as a no-op, so callers only register what they care
//! about.
//!
//! ```rust
//! use progressive_fetch::ProgressCallbacks;
//!
//! let callbacks = ProgressCallbacks::new()
//!     .on_start(|total| println!("starting, {:?} bytes expected", total))
//!     .on_update(|loaded, total| println!("{} / {:?}", loaded, total))
//!     .on_finish(|_| println!("done"));
//! ```

use std::fmt;
use std::sync::Arc;

/// Called once when the response headers are in, with the declared total.
pub type StartCallback = Arc<dyn Fn(Option<u64>) + Send + Sync>;
/// Called for every chunk with the running byte count and the declared total.
pub type UpdateCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;
/// Called once when the body stream ends cleanly.
pub type FinishCallback = Arc<dyn Fn(Option<u64>) + Send + Sync>;
/// Called once when the body stream yields an error.
pub type FailCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Lifecycle hooks invoked while a response body is streamed.
///
/// For a body that is read to its end, the hooks fire in this order:
/// `on_start` once, `on_update` zero or more times with a non-decreasing
/// byte count, then exactly one of `on_finish` or `on_fail`.
#[derive(Clone)]
pub struct ProgressCallbacks {
    start: StartCallback,
    update: UpdateCallback,
    finish: FinishCallback,
    fail: FailCallback,
}

impl Default for ProgressCallbacks {
    fn default() -> Self {
        Self {
            start: Arc::new(|_| {}),
            update: Arc::new(|_, _| {}),
            finish: Arc::new(|_| {}),
            fail: Arc::new(|_, _| {}),
        }
    }
}

impl fmt::Debug for ProgressCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressCallbacks").finish_non_exhaustive()
    }
}

impl ProgressCallbacks {
    /// Creates a set of callbacks that do nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hook fired once before any body byte is delivered.
    pub fn on_start<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<u64>) + Send + Sync + 'static,
    {
        self.start = Arc::new(callback);
        self
    }

    /// Set the hook fired after each chunk is counted.
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.update = Arc::new(callback);
        self
    }

    /// Set the hook fired when the body ends cleanly.
    pub fn on_finish<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<u64>) + Send + Sync + 'static,
    {
        self.finish = Arc::new(callback);
        self
    }

    /// Set the hook fired when the body stream fails mid-transfer.
    ///
    /// It receives the number of bytes that made it through before the
    /// failure. `on_finish` is not called for a failed stream.
    pub fn on_fail<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.fail = Arc::new(callback);
        self
    }

    pub(crate) fn start(&self, total: Option<u64>) {
        (self.start)(total)
    }

    pub(crate) fn update(&self, loaded: u64, total: Option<u64>) {
        (self.update)(loaded, total)
    }

    pub(crate) fn finish(&self, total: Option<u64>) {
        (self.finish)(total)
    }

    pub(crate) fn fail(&self, loaded: u64, total: Option<u64>) {
        (self.fail)(loaded, total)
    }
}
