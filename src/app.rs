use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/rate", post(handlers::rate_form))
        .route("/api/actions", get(handlers::list_actions))
        .route("/api/today", get(handlers::get_today))
        .route("/api/history", get(handlers::get_history))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/ledger", get(handlers::get_ledger))
        .route("/api/events", post(handlers::record_event))
        .route("/api/events/:id", delete(handlers::delete_event))
        .route("/api/undo", post(handlers::undo_event))
        .with_state(state)
}
