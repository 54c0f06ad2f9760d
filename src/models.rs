use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::summary::DaySummary;

/// Action labels offered by the page's picker.
pub const PREDEFINED_ACTIONS: [&str; 10] = [
    "Exercise",
    "Healthy meal",
    "Work task completed",
    "Meditation/Mindfulness",
    "Learning/Reading",
    "Social interaction",
    "Sleep schedule",
    "Household chores",
    "Creative activity",
    "Self-care",
];

/// A subjective rating, stored as the bare integer -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Rating {
    Negative,
    Neutral,
    Positive,
}

impl Rating {
    pub fn value(self) -> i8 {
        match self {
            Rating::Negative => -1,
            Rating::Neutral => 0,
            Rating::Positive => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Negative => "Negative",
            Rating::Neutral => "Neutral",
            Rating::Positive => "Positive",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Rating::Negative => "😞",
            Rating::Neutral => "😐",
            Rating::Positive => "😊",
        }
    }
}

/// Ratings in the order the page lays out its buttons.
pub const RATINGS: [Rating; 3] = [Rating::Negative, Rating::Neutral, Rating::Positive];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating must be -1, 0 or 1 (got '{0}')")]
pub struct InvalidRating(pub String);

impl TryFrom<i8> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Rating::Negative),
            0 => Ok(Rating::Neutral),
            1 => Ok(Rating::Positive),
            other => Err(InvalidRating(other.to_string())),
        }
    }
}

impl From<Rating> for i8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl FromStr for Rating {
    type Err = InvalidRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-1" | "negative" => Ok(Rating::Negative),
            "0" | "neutral" => Ok(Rating::Neutral),
            "1" | "+1" | "positive" => Ok(Rating::Positive),
            _ => Err(InvalidRating(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub actions: Vec<RatingEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub rating: i8,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateForm {
    pub rating: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UndoRequest {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResponse {
    pub date: NaiveDate,
    pub event: RatingEvent,
    pub undo_window_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResponse {
    pub undone: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UndoOfferView {
    pub event_id: String,
    pub remaining_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub actions: Vec<RatingEvent>,
    pub summary: DaySummary,
    pub sum_expression: String,
    pub undo: Option<UndoOfferView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub summary: DaySummary,
    pub sum_expression: String,
    pub actions: Vec<RatingEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub days: Vec<HistoryDay>,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub net: i64,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub net: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_totals: Vec<WeeklyPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_parses_numbers_and_words() {
        assert_eq!("-1".parse::<Rating>().unwrap(), Rating::Negative);
        assert_eq!("neutral".parse::<Rating>().unwrap(), Rating::Neutral);
        assert_eq!("+1".parse::<Rating>().unwrap(), Rating::Positive);
        assert!("2".parse::<Rating>().is_err());
        assert_eq!(
            Rating::try_from(3i8).unwrap_err().to_string(),
            "rating must be -1, 0 or 1 (got '3')"
        );
    }

    #[test]
    fn rating_serializes_as_integer() {
        let json = serde_json::to_string(&[Rating::Negative, Rating::Positive]).unwrap();
        assert_eq!(json, "[-1,1]");
        assert!(serde_json::from_str::<Rating>("5").is_err());
    }

    #[test]
    fn event_without_description_omits_the_field() {
        let event = RatingEvent {
            id: "abc".into(),
            timestamp: "2026-01-05T08:30:00Z".parse().unwrap(),
            rating: Rating::Neutral,
            description: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("description").is_none());
        assert_eq!(value["rating"], 0);
    }

    #[test]
    fn browser_snapshot_with_description_loads() {
        let raw = r#"[{"date":"2025-03-02","actions":[
            {"id":"m7q1x0k2abc","timestamp":"2025-03-02T18:04:11.512Z",
             "description":"Exercise","rating":1}]}]"#;
        let days: Vec<DayRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(days[0].actions[0].description.as_deref(), Some("Exercise"));
        assert_eq!(days[0].actions[0].rating, Rating::Positive);
    }
}
