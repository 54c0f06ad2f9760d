use crate::ledger::{Ledger, LedgerAction};
use crate::models::{Rating, RatingEvent};
use crate::store::{LedgerStore, StoreError};
use crate::undo::UndoTimer;
use chrono::{DateTime, NaiveDate, Utc};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub date: NaiveDate,
    pub event: RatingEvent,
}

/// Owns the current ledger value and writes a snapshot after every change.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LedgerStore>,
    ledger: Arc<Mutex<Ledger>>,
    undo: UndoTimer,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, ledger: Ledger, undo_window: Duration) -> Self {
        Self {
            store,
            ledger: Arc::new(Mutex::new(ledger)),
            undo: UndoTimer::new(undo_window),
        }
    }

    /// Hydrates from `store`.
    pub async fn load(store: Arc<dyn LedgerStore>, undo_window: Duration) -> Result<Self, StoreError> {
        let ledger = store.load().await?;
        info!(days = ledger.days().len(), "ledger loaded");
        Ok(Self::new(store, ledger, undo_window))
    }

    pub async fn snapshot(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }

    pub fn undo(&self) -> &UndoTimer {
        &self.undo
    }

    pub async fn record_event(
        &self,
        rating: Rating,
        description: Option<String>,
    ) -> Result<RecordedEvent, StoreError> {
        self.record_event_at(Utc::now(), rating, description).await
    }

    /// Files the event under the UTC calendar day of `now`.
    pub async fn record_event_at(
        &self,
        now: DateTime<Utc>,
        rating: Rating,
        description: Option<String>,
    ) -> Result<RecordedEvent, StoreError> {
        let date = now.date_naive();
        let event = RatingEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            rating,
            description,
        };

        // The offer is made under the ledger guard so the newest record always owns it.
        let mut ledger = self.ledger.lock().await;
        self.commit(
            &mut ledger,
            LedgerAction::Record {
                date,
                event: event.clone(),
            },
        )
        .await?;
        self.undo.offer(&event.id).await;
        drop(ledger);

        info!(id = %event.id, %date, rating = rating.label(), "event recorded");
        Ok(RecordedEvent { date, event })
    }

    /// Returns whether an event was removed. Unknown ids change nothing.
    pub async fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let mut ledger = self.ledger.lock().await;
        self.remove(&mut ledger, id).await
    }

    /// Deletes `id` only while its undo window is open. The offer stays
    /// open when the delete cannot be persisted.
    pub async fn undo_last(&self, id: &str) -> Result<bool, StoreError> {
        let mut ledger = self.ledger.lock().await;
        if !self.undo.is_open(id).await {
            debug!(%id, "undo not offered");
            return Ok(false);
        }
        self.remove(&mut ledger, id).await
    }

    async fn remove(&self, ledger: &mut Ledger, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .commit(ledger, LedgerAction::Delete { id: id.to_string() })
            .await?;
        self.undo.cancel(id).await;
        if removed {
            info!(%id, "event deleted");
        } else {
            debug!(%id, "delete ignored, no such event");
        }
        Ok(removed)
    }

    /// Applies `action`, persists the result and swaps it in. Returns
    /// whether the ledger changed; unchanged ledgers are not written.
    async fn commit(&self, ledger: &mut Ledger, action: LedgerAction) -> Result<bool, StoreError> {
        let next = ledger.apply(action);
        if next == *ledger {
            return Ok(false);
        }

        self.store.save(&next).await?;
        *ledger = next;
        Ok(true)
    }
}
