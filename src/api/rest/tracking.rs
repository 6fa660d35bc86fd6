use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::error::{AppError, TrackingError};
use crate::models::tracking::TrackingData;
use crate::session::SessionContext;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/track/:tracking_number", get(track))
        .route("/history", get(search_history))
}

#[derive(Serialize)]
pub struct SearchHistoryResponse {
    pub session_id: Option<String>,
    pub searches: Vec<String>,
}

async fn track(
    State(state): State<Arc<AppState>>,
    Path(tracking_number): Path<String>,
    session: SessionContext,
) -> Result<Json<TrackingData>, AppError> {
    let code = tracking_number.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest(
            "tracking number cannot be empty".to_string(),
        ));
    }

    let _guard = match session.session_id.as_deref() {
        Some(session_id) => Some(state.sessions.begin_search(session_id).ok_or_else(|| {
            AppError::Conflict("a search is already in progress for this session".to_string())
        })?),
        None => None,
    };

    let in_flight = state.metrics.search_started();
    let start = Instant::now();
    let result = state.resolver.resolve_detailed(code, session.user_id).await;
    let elapsed = start.elapsed().as_secs_f64();
    drop(in_flight);

    match result {
        Ok(resolved) => {
            state.metrics.observe_lookup(resolved.strategy.as_str(), elapsed);
            if let Some(session_id) = session.session_id.as_deref() {
                state.sessions.record_search(session_id, code);
            }
            Ok(Json(resolved.data))
        }
        Err(err) => {
            let outcome = match &err {
                TrackingError::NotFound { .. } => "not_found",
                TrackingError::Transport(_) => "transport_error",
            };
            state.metrics.observe_lookup(outcome, elapsed);
            Err(err.into())
        }
    }
}

async fn search_history(
    State(state): State<Arc<AppState>>,
    session: SessionContext,
) -> Json<SearchHistoryResponse> {
    let searches = session
        .session_id
        .as_deref()
        .map(|session_id| state.sessions.history(session_id))
        .unwrap_or_default();

    Json(SearchHistoryResponse {
        session_id: session.session_id,
        searches,
    })
}
