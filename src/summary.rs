use crate::models::{Rating, RatingEvent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Overall {
    Positive,
    #[default]
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaySummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub overall: Overall,
}

impl DaySummary {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    pub fn net(&self) -> i64 {
        self.positive as i64 - self.negative as i64
    }
}

pub fn summary_for(events: &[RatingEvent]) -> DaySummary {
    let mut summary = DaySummary::default();
    for event in events {
        match event.rating {
            Rating::Positive => summary.positive += 1,
            Rating::Neutral => summary.neutral += 1,
            Rating::Negative => summary.negative += 1,
        }
    }

    summary.overall = match summary.net() {
        net if net > 0 => Overall::Positive,
        net if net < 0 => Overall::Negative,
        _ => Overall::Neutral,
    };
    summary
}

pub fn signed_sum(events: &[RatingEvent]) -> i64 {
    events.iter().map(|event| i64::from(event.rating.value())).sum()
}

/// Renders the day as arithmetic, e.g. `1, -1, 1 = 1`. An empty day is `0`.
pub fn sum_expression(events: &[RatingEvent]) -> String {
    if events.is_empty() {
        return "0".to_string();
    }

    let terms = events
        .iter()
        .map(|event| event.rating.value().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{terms} = {}", signed_sum(events))
}
