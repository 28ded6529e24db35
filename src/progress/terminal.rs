//! Terminal rendering of a status area with indicatif.
//!
//! The status area is an [`indicatif::MultiProgress`]: hiding it swaps its draw
//! target for a hidden one, and every request adds one child
//! [`ProgressBar`] measured in bytes.
//!
//! ```rust,no_run
//! use progressive_fetch::progress::{ProgressBarController, ProgressBarOpts, TerminalStatus};
//! use progressive_fetch::Fetcher;
//!
//! # async fn example() -> Result<(), progressive_fetch::Error> {
//! let status = TerminalStatus::new(ProgressBarOpts::with_pip_style());
//! let controller = ProgressBarController::new(status, Fetcher::new()?);
//!
//! let response = controller.request("https://example.com/app_bg.wasm").await?;
//! let wasm = response.bytes().await?;
//! # Ok(())
//! # }
//! ```

use super::style::ProgressBarOpts;
use super::view::StatusView;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::atomic::{AtomicBool, Ordering};

/// A [`StatusView`] drawing one terminal progress bar per request.
#[derive(Debug)]
pub struct TerminalStatus {
    multi: MultiProgress,
    opts: ProgressBarOpts,
    visible: AtomicBool,
}

impl TerminalStatus {
    /// Create a hidden status area whose bars use `opts`.
    pub fn new(opts: ProgressBarOpts) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            opts,
            visible: AtomicBool::new(false),
        }
    }

    /// The multi-progress instance hosting the bars.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    /// Whether the status area is currently drawn.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Default for TerminalStatus {
    fn default() -> Self {
        Self::new(ProgressBarOpts::default())
    }
}

impl StatusView for TerminalStatus {
    type Bar = ProgressBar;

    fn append_bar(&self) -> ProgressBar {
        self.multi.add(self.opts.to_progress_bar(None))
    }

    fn update_bar(&self, bar: &ProgressBar, loaded: u64, total: Option<u64>) {
        if let Some(total) = total {
            if bar.length() != Some(total) {
                bar.set_length(total);
                bar.set_style(self.opts.to_progress_style());
            }
        }
        bar.set_position(loaded);
    }

    fn complete_bar(&self, bar: &ProgressBar, total: Option<u64>) {
        if let Some(total) = total {
            bar.set_length(total);
            bar.set_position(total);
        }
        if self.opts.clear {
            bar.finish_and_clear();
        } else {
            bar.finish();
        }
    }

    fn fail_bar(&self, bar: &ProgressBar, _loaded: u64) {
        bar.abandon_with_message("failed");
    }

    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        let target = if visible && self.opts.is_enabled() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        self.multi.set_draw_target(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let status = TerminalStatus::default();
        assert!(!status.is_visible());
    }

    #[test]
    fn test_bar_tracks_bytes() {
        let status = TerminalStatus::new(ProgressBarOpts::hidden());
        let bar = status.append_bar();
        assert_eq!(bar.length(), None);

        status.update_bar(&bar, 250, Some(1000));
        assert_eq!(bar.length(), Some(1000));
        assert_eq!(bar.position(), 250);

        status.complete_bar(&bar, Some(1000));
        assert_eq!(bar.position(), 1000);
        assert!(bar.is_finished());
    }

    #[test]
    fn test_bar_without_total_counts_bytes() {
        let status = TerminalStatus::new(ProgressBarOpts::hidden());
        let bar = status.append_bar();

        status.update_bar(&bar, 42, None);
        assert_eq!(bar.length(), None);
        assert_eq!(bar.position(), 42);
    }

    #[test]
    fn test_visibility_toggle() {
        let status = TerminalStatus::new(ProgressBarOpts::hidden());
        status.set_visible(true);
        assert!(status.is_visible());
        status.set_visible(false);
        assert!(!status.is_visible());
    }
}
