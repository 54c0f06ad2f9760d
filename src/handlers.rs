use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::models::{
    HistoryDay, HistoryResponse, PREDEFINED_ACTIONS, RateForm, Rating, RecordRequest,
    RecordResponse, StatsResponse, TodayResponse, UndoOfferView, UndoRequest, UndoResponse,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::summary::{sum_expression, summary_for};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{NaiveDate, Utc};

const MAX_DESCRIPTION_CHARS: usize = 200;

pub async fn index() -> Html<String> {
    Html(render_index(today()))
}

pub async fn list_actions() -> Json<Vec<&'static str>> {
    Json(PREDEFINED_ACTIONS.to_vec())
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let date = today();
    let ledger = state.snapshot().await;
    let actions = ledger.events_on(date).to_vec();
    let undo = state
        .undo()
        .pending()
        .await
        .map(|(event_id, remaining)| UndoOfferView {
            event_id,
            remaining_ms: remaining.as_millis() as u64,
        });

    Json(TodayResponse {
        date,
        summary: summary_for(&actions),
        sum_expression: sum_expression(&actions),
        actions,
        undo,
    })
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let ledger = state.snapshot().await;
    Json(history_at(today(), &ledger))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let ledger = state.snapshot().await;
    Json(build_stats(&ledger))
}

pub async fn get_ledger(State(state): State<AppState>) -> Json<Ledger> {
    Json(state.snapshot().await)
}

pub async fn record_event(
    State(state): State<AppState>,
    Json(payload): Json<RecordRequest>,
) -> Result<(StatusCode, Json<RecordResponse>), AppError> {
    let rating = Rating::try_from(payload.rating).map_err(|err| AppError::bad_request(err.to_string()))?;
    let description = normalize_description(payload.description)?;

    let recorded = state.record_event(rating, description).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            date: recorded.date,
            event: recorded.event,
            undo_window_ms: state.undo().window().as_millis() as u64,
        }),
    ))
}

pub async fn rate_form(
    State(state): State<AppState>,
    Form(form): Form<RateForm>,
) -> Result<Redirect, AppError> {
    let rating = form
        .rating
        .parse::<Rating>()
        .map_err(|err| AppError::bad_request(err.to_string()))?;
    let description = normalize_description(form.description)?;

    state.record_event(rating, description).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn undo_event(
    State(state): State<AppState>,
    Json(payload): Json<UndoRequest>,
) -> Result<Json<UndoResponse>, AppError> {
    let undone = state.undo_last(&payload.id).await?;
    Ok(Json(UndoResponse { undone }))
}

fn history_at(today: NaiveDate, ledger: &Ledger) -> HistoryResponse {
    let days = ledger
        .previous_days(today)
        .into_iter()
        .map(|day| {
            let mut chronological = day.actions.clone();
            chronological.reverse();
            HistoryDay {
                date: day.date,
                summary: summary_for(&day.actions),
                sum_expression: sum_expression(&chronological),
                actions: day.actions,
            }
        })
        .collect();
    HistoryResponse { days }
}

fn normalize_description(raw: Option<String>) -> Result<Option<String>, AppError> {
    let Some(text) = raw.map(|value| value.trim().to_string()) else {
        return Ok(None);
    };
    if text.is_empty() {
        return Ok(None);
    }
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::bad_request(format!(
            "description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(Some(text))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
