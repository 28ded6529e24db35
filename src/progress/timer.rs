//! Delayed hiding of a status area.
//!
//! One [`HideTimer`] belongs to each attached status area. It holds at most
//! one pending hide; scheduling a new one cancels the previous one first, and
//! a request starting in the meantime cancels it outright.
//!
//! Every schedule or cancel bumps a generation counter under the slot lock. A
//! hide only runs while holding that lock and only if its generation is still
//! current, so once [`HideTimer::cancel`] returns no earlier hide can land.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{trace, warn};

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    task: Option<AbortHandle>,
}

impl Slot {
    /// Invalidate whatever is pending and return the new generation.
    fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation
    }
}

/// A single cancellable hide slot.
#[derive(Debug)]
pub struct HideTimer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl HideTimer {
    /// Creates a timer that fires `delay` after being scheduled.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// The delay between scheduling and hiding.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a scheduled hide has not fired yet.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot)
            .task
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Drop the pending hide, if any.
    ///
    /// Waits for a hide that is already running to complete.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        if slot.task.is_some() {
            trace!("cancelling pending hide");
        }
        slot.bump();
    }

    /// Cancel the pending hide and store a new one running `hide` after the delay.
    ///
    /// Outside a tokio runtime there is nothing to run the timer on, so `hide`
    /// runs immediately.
    pub fn schedule<F>(&self, hide: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        let generation = slot.bump();

        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime available, hiding without delay");
            hide();
            return;
        };

        let delay = self.delay;
        let shared = self.slot.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&shared);
            if slot.generation != generation {
                trace!("hide superseded");
                return;
            }
            slot.task = None;
            trace!("hiding status");
            hide();
        });
        slot.task = Some(task.abort_handle());
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    // The slot stays consistent across a panic in `hide`.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
