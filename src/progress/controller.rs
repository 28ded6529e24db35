//! Binding progress widgets to fetches.
//!
//! A [`ProgressBarController`] is attached once to a status area and then
//! used for any number of requests. Every request gets its own widget; all
//! widgets share the status area and its [`HideTimer`]:
//!
//! - a request starting shows the area and cancels a pending hide,
//! - a request ending (cleanly or not) schedules a hide [`HIDE_DELAY`] later,
//!   replacing any hide already scheduled.
//!
//! The area therefore stays up until [`HIDE_DELAY`] after the last of a burst
//! of overlapping requests has ended.
//!
//! # Examples
//!
//! ```rust,no_run
//! use progressive_fetch::progress::dom::Document;
//! use progressive_fetch::progress::ProgressBarController;
//! use progressive_fetch::Fetcher;
//!
//! # async fn example() -> Result<(), progressive_fetch::Error> {
//! let document = Document::new();
//! let canvas = document.create_element("canvas");
//! document.set_id(canvas, "game");
//! document.append_child(document.body(), canvas)?;
//!
//! let controller = ProgressBarController::attach(&document, "game", Fetcher::new()?)?;
//! let wasm = controller
//!     .request("https://example.com/game_bg.wasm")
//!     .await?
//!     .bytes()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::dom::{Document, DomStatus};
use super::timer::HideTimer;
use super::view::StatusView;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, ProgressCallbacks, ProgressResponse, Resource};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long the status area stays visible after the last request ended.
pub const HIDE_DELAY: Duration = Duration::from_millis(50);

/// Drives a [`StatusView`] from the progress of the requests it makes.
pub struct ProgressBarController<V: StatusView> {
    view: Arc<V>,
    timer: Arc<HideTimer>,
    fetcher: Fetcher,
}

impl<V: StatusView> Clone for ProgressBarController<V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            timer: self.timer.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<V: StatusView + fmt::Debug> fmt::Debug for ProgressBarController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBarController")
            .field("view", &self.view)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl ProgressBarController<DomStatus> {
    /// Attach to the element `target_id` of `document`.
    ///
    /// See [`Document::attach_status`] for the markup this sets up.
    pub fn attach(document: &Document, target_id: &str, fetcher: Fetcher) -> Result<Self> {
        let status = document.attach_status(target_id)?;
        Ok(Self::new(status, fetcher))
    }
}

impl<V: StatusView> ProgressBarController<V> {
    /// Bind `view` to requests sent with `fetcher`.
    ///
    /// The view is hidden right away.
    pub fn new(view: V, fetcher: Fetcher) -> Self {
        view.set_visible(false);
        Self {
            view: Arc::new(view),
            timer: Arc::new(HideTimer::new(HIDE_DELAY)),
            fetcher,
        }
    }

    /// The status area.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The hide timer shared by every request of this controller.
    pub fn timer(&self) -> &HideTimer {
        &self.timer
    }

    /// Fetch `resource`, drawing its progress in a new widget.
    ///
    /// The widget is created before the request is sent. If the request
    /// fails before any response arrives, no hook fires and the status area
    /// is left as it was.
    pub async fn request<R>(&self, resource: R) -> Result<ProgressResponse>
    where
        R: TryInto<Resource>,
        Error: From<R::Error>,
    {
        let callbacks = self.add_widget();
        self.fetcher.fetch_with_progress(resource, callbacks).await
    }

    /// Append a widget and return the hooks that drive it.
    ///
    /// [`request`](Self::request) uses this; call it directly to show the
    /// progress of a body that does not come from this controller's fetcher.
    pub fn add_widget(&self) -> ProgressCallbacks {
        let bar = Arc::new(self.view.append_bar());

        let (view, timer) = (self.view.clone(), self.timer.clone());
        let on_start = move |total: Option<u64>| {
            debug!(?total, "request started, showing status");
            timer.cancel();
            view.set_visible(true);
        };

        let (view, bar_ref) = (self.view.clone(), bar.clone());
        let on_update = move |loaded: u64, total: Option<u64>| {
            view.update_bar(&bar_ref, loaded, total);
        };

        let (view, timer, bar_ref) = (self.view.clone(), self.timer.clone(), bar.clone());
        let on_finish = move |total: Option<u64>| {
            view.complete_bar(&bar_ref, total);
            schedule_hide(&view, &timer);
        };

        let (view, timer, bar_ref) = (self.view.clone(), self.timer.clone(), bar);
        let on_fail = move |loaded: u64, _total: Option<u64>| {
            view.fail_bar(&bar_ref, loaded);
            schedule_hide(&view, &timer);
        };

        ProgressCallbacks::new()
            .on_start(on_start)
            .on_update(on_update)
            .on_finish(on_finish)
            .on_fail(on_fail)
    }
}

fn schedule_hide<V: StatusView>(view: &Arc<V>, timer: &HideTimer) {
    debug!(delay = ?timer.delay(), "request ended, scheduling hide");
    let view = view.clone();
    timer.schedule(move || view.set_visible(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ProgressStream;
    use crate::progress::dom::classes;
    use futures::{stream, StreamExt};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn attached() -> (Document, ProgressBarController<DomStatus>) {
        let document = Document::new();
        let canvas = document.create_element("canvas");
        document.set_id(canvas, "game");
        document.append_child(document.body(), canvas).unwrap();
        let controller =
            ProgressBarController::attach(&document, "game", Fetcher::new().unwrap()).unwrap();
        (document, controller)
    }

    fn body(chunks: usize, size: usize) -> impl futures::Stream<Item = Result<Vec<u8>>> + Unpin {
        stream::iter((0..chunks).map(move |_| Ok(vec![7u8; size])))
    }

    #[tokio::test(start_paused = true)]
    async fn test_widget_tracks_progress() {
        let (document, controller) = attached();
        let callbacks = controller.add_widget();
        let fill = document.children(document.children(controller.view().element())[0])[0];

        let mut tap = ProgressStream::new(body(4, 250), Some(1000), callbacks);
        assert!(controller.view().is_visible());

        tap.next().await;
        assert_eq!(document.style(fill, "width").as_deref(), Some("25%"));

        while tap.next().await.is_some() {}
        assert_eq!(document.style(fill, "width").as_deref(), Some("100%"));
        assert!(controller.view().is_visible());
        assert!(controller.timer().is_pending());

        tokio::time::sleep(HIDE_DELAY + Duration::from_millis(1)).await;
        assert!(!controller.view().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_total_leaves_width_until_finish() {
        let (document, controller) = attached();
        let callbacks = controller.add_widget();
        let fill = document.children(document.children(controller.view().element())[0])[0];

        let mut tap = ProgressStream::new(body(2, 10), None, callbacks);
        tap.next().await;
        assert_eq!(document.style(fill, "width"), None);

        while tap.next().await.is_some() {}
        assert_eq!(document.style(fill, "width").as_deref(), Some("100%"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_transfer_still_hides() {
        let (document, controller) = attached();
        let callbacks = controller.add_widget();
        let fill = document.children(document.children(controller.view().element())[0])[0];

        let chunks = stream::iter(vec![
            Ok(vec![0u8; 10]),
            Err(Error::Internal("connection reset".into())),
        ]);
        let tap = ProgressStream::new(chunks, Some(100), callbacks);
        let _: Vec<_> = tap.collect().await;

        assert!(document.has_class(fill, classes::PROGRESS_BAR_FAILED));
        assert!(controller.view().is_visible());

        tokio::time::sleep(HIDE_DELAY * 2).await;
        assert!(!controller.view().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_requests_keep_status_visible() {
        let (_document, controller) = attached();

        let mut first = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());
        tokio::time::sleep(Duration::from_millis(10)).await;
        let mut second = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());

        while first.next().await.is_some() {}
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(controller.view().is_visible());

        while second.next().await.is_some() {}
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(controller.view().is_visible());

        tokio::time::sleep(Duration::from_millis(11)).await;
        assert!(!controller.view().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_cancels_pending_hide() {
        let (_document, controller) = attached();

        let mut first = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());
        while first.next().await.is_some() {}
        assert!(controller.timer().is_pending());

        tokio::time::sleep(Duration::from_millis(20)).await;
        let _second = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());
        assert!(!controller.timer().is_pending());

        tokio::time::sleep(HIDE_DELAY * 4).await;
        assert!(controller.view().is_visible());
    }

    /// A view whose hide takes a while to land.
    #[derive(Default)]
    struct SlowHideView {
        visible: AtomicBool,
    }

    impl StatusView for SlowHideView {
        type Bar = ();

        fn append_bar(&self) -> Self::Bar {}

        fn update_bar(&self, _bar: &(), _loaded: u64, _total: Option<u64>) {}

        fn complete_bar(&self, _bar: &(), _total: Option<u64>) {}

        fn set_visible(&self, visible: bool) {
            if !visible {
                std::thread::sleep(Duration::from_millis(30));
            }
            self.visible.store(visible, Ordering::SeqCst);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_running_hide_does_not_override_new_start() {
        let controller =
            ProgressBarController::new(SlowHideView::default(), Fetcher::new().unwrap());
        let visible = || controller.view().visible.load(Ordering::SeqCst);

        let mut first = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());
        while first.next().await.is_some() {}

        // The hide fires at 50ms and takes until about 80ms to land.
        tokio::time::sleep(HIDE_DELAY + Duration::from_millis(10)).await;
        let _second = ProgressStream::new(body(1, 10), Some(10), controller.add_widget());
        assert!(visible());

        tokio::time::sleep(HIDE_DELAY).await;
        assert!(visible());
        assert!(!controller.timer().is_pending());
    }

    #[test]
    fn test_each_request_gets_its_own_widget() {
        let (document, controller) = attached();
        controller.add_widget();
        controller.add_widget();

        let tracks = document.children(controller.view().element());
        assert_eq!(tracks.len(), 2);
        assert!(tracks
            .iter()
            .all(|&t| document.has_class(t, classes::PROGRESS_TRACK)));
    }
}
