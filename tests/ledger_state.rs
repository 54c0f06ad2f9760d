use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use self_rating::models::Rating;
use self_rating::{AppState, Ledger, LedgerStore, MemoryStore, StoreError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::advance;

/// Memory store whose saves can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

#[async_trait]
impl LedgerStore for FlakyStore {
    async fn load(&self) -> Result<Ledger, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: "flaky".into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.save(ledger).await
    }
}

const WINDOW: Duration = Duration::from_secs(5);

async fn fresh_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::load(store.clone(), WINDOW).await.unwrap();
    (state, store)
}

#[tokio::test]
async fn every_record_lands_in_one_day_and_is_persisted() {
    let (state, store) = fresh_state().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();

    for rating in [Rating::Positive, Rating::Negative, Rating::Positive] {
        state.record_event_at(now, rating, None).await.unwrap();
    }

    let ledger = state.snapshot().await;
    assert_eq!(ledger.days().len(), 1);
    assert_eq!(ledger.events_on(now.date_naive()).len(), 3);
    assert_eq!(store.load().await.unwrap(), ledger);
}

#[tokio::test]
async fn recorded_event_carries_its_description_and_time() {
    let (state, _) = fresh_state().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 18, 5, 0).unwrap();

    let recorded = state
        .record_event_at(now, Rating::Neutral, Some("Sleep schedule".into()))
        .await
        .unwrap();

    assert_eq!(recorded.date, now.date_naive());
    assert_eq!(recorded.event.timestamp, now);
    assert_eq!(recorded.event.description.as_deref(), Some("Sleep schedule"));
    assert!(!recorded.event.id.is_empty());
}

#[tokio::test]
async fn events_are_filed_under_their_utc_day() {
    let (state, _) = fresh_state().await;
    let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
    let evening = new_york.with_ymd_and_hms(2026, 3, 14, 22, 0, 0).unwrap();

    let recorded = state
        .record_event_at(evening.with_timezone(&Utc), Rating::Positive, None)
        .await
        .unwrap();

    let utc_day = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    assert_eq!(recorded.date, utc_day);
    let ledger = state.snapshot().await;
    assert_eq!(ledger.events_on(utc_day).len(), 1);
    assert!(ledger.day(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()).is_none());
}

#[tokio::test]
async fn deleting_twice_is_a_noop_and_drops_empty_days() {
    let (state, store) = fresh_state().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    let recorded = state.record_event_at(now, Rating::Positive, None).await.unwrap();

    assert!(state.delete_event(&recorded.event.id).await.unwrap());
    assert!(!state.delete_event(&recorded.event.id).await.unwrap());

    assert!(state.snapshot().await.day(now.date_naive()).is_none());
    assert_eq!(store.blob().await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn unknown_delete_does_not_write() {
    let store = Arc::new(MemoryStore::with_blob("[]"));
    let state = AppState::load(store.clone(), WINDOW).await.unwrap();

    assert!(!state.delete_event("missing").await.unwrap());
    assert_eq!(store.blob().await.as_deref(), Some("[]"));
}

#[tokio::test(start_paused = true)]
async fn undo_within_window_removes_event() {
    let (state, _) = fresh_state().await;
    let recorded = state.record_event(Rating::Negative, None).await.unwrap();

    advance(Duration::from_secs(3)).await;
    assert!(state.undo_last(&recorded.event.id).await.unwrap());
    assert!(state.snapshot().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn undo_after_window_keeps_event() {
    let (state, _) = fresh_state().await;
    let recorded = state.record_event(Rating::Negative, None).await.unwrap();

    advance(Duration::from_secs(6)).await;
    assert!(!state.undo_last(&recorded.event.id).await.unwrap());
    assert!(state.snapshot().await.contains_event(&recorded.event.id));
}

#[tokio::test(start_paused = true)]
async fn undo_only_applies_to_latest_event() {
    let (state, _) = fresh_state().await;
    let first = state.record_event(Rating::Positive, None).await.unwrap();
    let second = state.record_event(Rating::Neutral, None).await.unwrap();

    assert!(!state.undo_last(&first.event.id).await.unwrap());
    assert!(state.undo_last(&second.event.id).await.unwrap());

    let ledger = state.snapshot().await;
    assert!(ledger.contains_event(&first.event.id));
    assert!(!ledger.contains_event(&second.event.id));
}

#[tokio::test(start_paused = true)]
async fn delete_withdraws_undo_offer() {
    let (state, _) = fresh_state().await;
    let recorded = state.record_event(Rating::Positive, None).await.unwrap();

    state.delete_event(&recorded.event.id).await.unwrap();
    assert!(state.undo().pending().await.is_none());
    assert!(!state.undo_last(&recorded.event.id).await.unwrap());
}

#[tokio::test]
async fn hydrates_from_existing_snapshot() {
    let raw = r#"[{"date":"2025-11-02","actions":[
        {"id":"lq2x9","timestamp":"2025-11-02T07:15:00.000Z","rating":-1},
        {"id":"lq2xa","timestamp":"2025-11-02T21:40:00.000Z","rating":1,"description":"Exercise"}]}]"#;
    let store = Arc::new(MemoryStore::with_blob(raw));
    let state = AppState::load(store, WINDOW).await.unwrap();

    let ledger: Ledger = state.snapshot().await;
    assert_eq!(ledger.days().len(), 1);
    assert_eq!(ledger.days()[0].actions.len(), 2);
}

#[tokio::test]
async fn malformed_snapshot_fails_to_load() {
    let store = Arc::new(MemoryStore::with_blob("{\"date\":"));
    let result = AppState::load(store, WINDOW).await;
    assert!(matches!(result, Err(StoreError::Malformed(_))));
}

#[tokio::test(start_paused = true)]
async fn concurrent_records_leave_the_offer_on_the_last_one() {
    let (state, _) = fresh_state().await;

    let (first, second) = tokio::join!(
        state.record_event(Rating::Positive, None),
        state.record_event(Rating::Negative, None)
    );
    first.unwrap();
    second.unwrap();

    let ledger = state.snapshot().await;
    let last = ledger.days()[0].actions.last().unwrap();
    let (offered, _) = state.undo().pending().await.expect("open offer");
    assert_eq!(offered, last.id);
}

#[tokio::test(start_paused = true)]
async fn failed_undo_keeps_the_offer_open() {
    let store = Arc::new(FlakyStore::default());
    let state = AppState::load(store.clone(), WINDOW).await.unwrap();
    let recorded = state.record_event(Rating::Neutral, None).await.unwrap();

    store.failing.store(true, Ordering::SeqCst);
    assert!(state.undo_last(&recorded.event.id).await.is_err());
    assert!(state.snapshot().await.contains_event(&recorded.event.id));
    assert!(state.undo().is_open(&recorded.event.id).await);

    store.failing.store(false, Ordering::SeqCst);
    assert!(state.undo_last(&recorded.event.id).await.unwrap());
    assert!(state.snapshot().await.is_empty());
}
