use crate::ledger::Ledger;
use crate::models::{DailyPoint, StatsResponse, WeeklyPoint};
use crate::summary::{DaySummary, summary_for};
use chrono::{Datelike, Duration, NaiveDate, Utc};

pub fn build_stats(ledger: &Ledger) -> StatsResponse {
    build_stats_at(Utc::now().date_naive(), ledger)
}

pub fn build_stats_at(today: NaiveDate, ledger: &Ledger) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let last_7_days = (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let summary = summary_for(ledger.events_on(date));
            DailyPoint {
                date: date.to_string(),
                positive: summary.positive,
                neutral: summary.neutral,
                negative: summary.negative,
                net: summary.net(),
            }
        })
        .collect();

    let current_week_start = week_start(today);
    let mut weekly_totals = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut totals = DaySummary::default();
        for day_offset in 0..7 {
            let day = summary_for(ledger.events_on(start + Duration::days(day_offset)));
            totals.positive += day.positive;
            totals.neutral += day.neutral;
            totals.negative += day.negative;
        }

        weekly_totals.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            positive: totals.positive,
            neutral: totals.neutral,
            negative: totals.negative,
            net: totals.net(),
        });
    }

    StatsResponse {
        last_7_days,
        weekly_totals,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
