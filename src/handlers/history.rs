use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::errors::ServiceError;
use crate::services::audit_log::HistoryFilter;
use crate::AppState;

pub fn history_router() -> Router<AppState> {
    Router::new()
        .route("/movements", get(list_movements))
        .route("/audits", get(list_audits))
}

/// Journal of every stock change, newest first.
async fn list_movements(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let movements = state.services.audit_log.list_movements(filter).await?;
    Ok(Json(movements))
}

/// Before and after snapshots recorded alongside each physical stock change.
async fn list_audits(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let audits = state.services.audit_log.list_audits(filter).await?;
    Ok(Json(audits))
}
