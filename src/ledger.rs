use crate::models::{DayRecord, RatingEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A change to the ledger. Applying one never mutates the source value.
#[derive(Debug, Clone)]
pub enum LedgerAction {
    Record { date: NaiveDate, event: RatingEvent },
    Delete { id: String },
}

/// Day records in creation order, at most one per date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: Vec<DayRecord>,
}

impl Ledger {
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Events recorded on `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> &[RatingEvent] {
        self.day(date).map(|day| day.actions.as_slice()).unwrap_or_default()
    }

    pub fn contains_event(&self, id: &str) -> bool {
        self.days
            .iter()
            .any(|day| day.actions.iter().any(|event| event.id == id))
    }

    /// Every day except `today`, most recent first, each day's events newest first.
    pub fn previous_days(&self, today: NaiveDate) -> Vec<DayRecord> {
        let mut days: Vec<DayRecord> = self
            .days
            .iter()
            .filter(|day| day.date != today)
            .cloned()
            .collect();
        days.sort_by(|a, b| b.date.cmp(&a.date));
        for day in &mut days {
            day.actions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        days
    }

    pub fn apply(&self, action: LedgerAction) -> Ledger {
        match action {
            LedgerAction::Record { date, event } => self.with_event(date, event),
            LedgerAction::Delete { id } => self.without_event(&id),
        }
    }

    fn with_event(&self, date: NaiveDate, event: RatingEvent) -> Ledger {
        let mut days = self.days.clone();
        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.actions.push(event),
            None => days.push(DayRecord {
                date,
                actions: vec![event],
            }),
        }
        Ledger { days }
    }

    fn without_event(&self, id: &str) -> Ledger {
        let Some(index) = self
            .days
            .iter()
            .position(|day| day.actions.iter().any(|event| event.id == id))
        else {
            return self.clone();
        };

        let mut days = self.days.clone();
        days[index].actions.retain(|event| event.id != id);
        if days[index].actions.is_empty() {
            days.remove(index);
        }
        Ledger { days }
    }
}
