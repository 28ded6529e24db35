//! Byte-counting tap over a body stream.
//!
//! [`ProgressStream`] wraps any stream of `Result<chunk, error>` items. Each
//! chunk is counted and reported before it is handed to the consumer
//! unchanged, on the same poll that produced it. Nothing is buffered, so the
//! underlying transport is only read as fast as the consumer reads the tap.

use super::callbacks::ProgressCallbacks;

use futures::stream::{FusedStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::{debug, trace};

/// Where a [`FetchSession`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Chunks are still flowing.
    Streaming,
    /// The body ended cleanly and `on_finish` has fired.
    Finished,
    /// The body yielded an error and `on_fail` has fired.
    Failed,
}

/// Byte accounting for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSession {
    loaded: u64,
    total: Option<u64>,
    phase: SessionPhase,
}

impl FetchSession {
    /// Starts a session for a body of `total` declared bytes.
    pub fn new(total: Option<u64>) -> Self {
        Self {
            loaded: 0,
            total,
            phase: SessionPhase::Streaming,
        }
    }

    /// Bytes observed so far.
    pub fn loaded(&self) -> u64 {
        self.loaded
    }

    /// Declared size of the body, if the server sent one.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn record(&mut self, len: usize) -> u64 {
        self.loaded = self.loaded.saturating_add(len as u64);
        self.loaded
    }
}

/// A stream adapter that reports progress for every chunk passing through.
///
/// `on_start` fires when the adapter is created. Once the inner stream ends
/// or yields an error, the adapter reports the terminal event and is fused:
/// every later poll returns `None`.
///
/// ```rust
/// use futures::{stream, StreamExt};
/// use progressive_fetch::{ProgressCallbacks, ProgressStream};
///
/// # async fn example() {
/// let chunks = stream::iter(vec![Ok::<_, std::io::Error>(vec![0u8; 4]), Ok(vec![1u8; 4])]);
/// let callbacks = ProgressCallbacks::new().on_update(|loaded, total| {
///     println!("{}/{:?}", loaded, total);
/// });
///
/// let tapped = ProgressStream::new(chunks, Some(8), callbacks);
/// let chunks: Vec<_> = tapped.collect().await;
/// assert_eq!(chunks.len(), 2);
/// # }
/// ```
pub struct ProgressStream<S> {
    inner: S,
    session: FetchSession,
    callbacks: ProgressCallbacks,
}

impl<S> std::fmt::Debug for ProgressStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStream")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<S> ProgressStream<S> {
    /// Wrap `inner`, firing `on_start(total)` right away.
    pub fn new(inner: S, total: Option<u64>, callbacks: ProgressCallbacks) -> Self {
        callbacks.start(total);
        Self {
            inner,
            session: FetchSession::new(total),
            callbacks,
        }
    }

    /// Byte accounting so far.
    pub fn session(&self) -> &FetchSession {
        &self.session
    }

    /// Return the wrapped stream, dropping the callbacks.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B, E> Stream for ProgressStream<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    type Item = Result<B, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.session.phase != SessionPhase::Streaming {
            return Poll::Ready(None);
        }

        match ready!(this.inner.poll_next_unpin(cx)) {
            Some(Ok(chunk)) => {
                let loaded = this.session.record(chunk.as_ref().len());
                trace!(loaded, total = ?this.session.total, "chunk received");
                this.callbacks.update(loaded, this.session.total);
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(e)) => {
                this.session.phase = SessionPhase::Failed;
                debug!(loaded = this.session.loaded, "body stream failed");
                this.callbacks.fail(this.session.loaded, this.session.total);
                Poll::Ready(Some(Err(e)))
            }
            None => {
                this.session.phase = SessionPhase::Finished;
                debug!(loaded = this.session.loaded, "body stream finished");
                this.callbacks.finish(this.session.total);
                Poll::Ready(None)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.session.phase {
            SessionPhase::Streaming => self.inner.size_hint(),
            _ => (0, Some(0)),
        }
    }
}

impl<S, B, E> FusedStream for ProgressStream<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    fn is_terminated(&self) -> bool {
        self.session.phase != SessionPhase::Streaming
    }
}
