//! The rendering seam between the controller and whatever draws progress.

/// A persistent status area hosting one progress widget per request.
///
/// The [`ProgressBarController`] owns the lifecycle; implementations only
/// draw. All methods are called synchronously from progress hooks, so they
/// must not block.
///
/// [`ProgressBarController`]: crate::progress::ProgressBarController
pub trait StatusView: Send + Sync + 'static {
    /// Handle to one progress widget.
    type Bar: Send + Sync + 'static;

    /// Create a new widget inside the status area.
    fn append_bar(&self) -> Self::Bar;

    /// Show `loaded` out of `total` bytes on `bar`.
    fn update_bar(&self, bar: &Self::Bar, loaded: u64, total: Option<u64>);

    /// Mark `bar` as fully downloaded.
    fn complete_bar(&self, bar: &Self::Bar, total: Option<u64>);

    /// Mark `bar` as broken off by a transfer error.
    fn fail_bar(&self, _bar: &Self::Bar, _loaded: u64) {}

    /// Show or hide the whole status area.
    fn set_visible(&self, visible: bool);
}
