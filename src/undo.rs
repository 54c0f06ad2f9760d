use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Mutex,
    task::AbortHandle,
    time::{Instant, sleep_until},
};
use tracing::debug;

struct PendingUndo {
    event_id: String,
    expires_at: Instant,
    timer: AbortHandle,
}

/// Tracks the single undo offer for the most recently recorded event.
///
/// Each offer owns a timer task that withdraws it when the window closes.
/// Replacing or cancelling an offer aborts its timer, so a late
/// timer never clears a newer offer.
#[derive(Clone)]
pub struct UndoTimer {
    window: Duration,
    slot: Arc<Mutex<Option<PendingUndo>>>,
}

impl UndoTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Opens the window for `event_id`, replacing any earlier offer.
    pub async fn offer(&self, event_id: &str) {
        let expires_at = Instant::now() + self.window;
        let mut slot = self.slot.lock().await;

        let shared = Arc::clone(&self.slot);
        let id = event_id.to_string();
        let timer = tokio::spawn(async move {
            sleep_until(expires_at).await;
            let mut slot = shared.lock().await;
            if slot.as_ref().is_some_and(|pending| pending.event_id == id) {
                debug!(event_id = %id, "undo window closed");
                *slot = None;
            }
        })
        .abort_handle();

        if let Some(previous) = slot.replace(PendingUndo {
            event_id: event_id.to_string(),
            expires_at,
            timer,
        }) {
            previous.timer.abort();
        }
    }

    /// Whether the window for `event_id` is still open.
    pub async fn is_open(&self, event_id: &str) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|pending| pending.event_id == event_id && Instant::now() < pending.expires_at)
    }

    /// Withdraws the offer for `event_id`, if it has one.
    pub async fn cancel(&self, event_id: &str) {
        let mut slot = self.slot.lock().await;
        if slot.as_ref().is_some_and(|pending| pending.event_id == event_id) {
            if let Some(pending) = slot.take() {
                pending.timer.abort();
            }
        }
    }

    /// The open offer and the time left on it.
    pub async fn pending(&self) -> Option<(String, Duration)> {
        let slot = self.slot.lock().await;
        slot.as_ref().and_then(|pending| {
            let remaining = pending.expires_at.saturating_duration_since(Instant::now());
            (!remaining.is_zero()).then(|| (pending.event_id.clone(), remaining))
        })
    }
}
