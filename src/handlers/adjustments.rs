use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::handlers::ReviewRequest;
use crate::services::adjustments::{AdjustmentFilter, CreateAdjustmentInput};
use crate::AppState;

pub fn adjustments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_adjustments).post(create_adjustment))
        .route("/:id", get(get_adjustment))
        .route("/:id/approve", post(approve_adjustment))
        .route("/:id/reject", post(reject_adjustment))
}

async fn create_adjustment(
    State(state): State<AppState>,
    Json(input): Json<CreateAdjustmentInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state.services.adjustments.create_adjustment(input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_adjustment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state.services.adjustments.get_adjustment(id).await?;
    Ok(Json(request))
}

async fn list_adjustments(
    State(state): State<AppState>,
    Query(filter): Query<AdjustmentFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let requests = state.services.adjustments.list_adjustments(filter).await?;
    Ok(Json(requests))
}

async fn approve_adjustment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let approved = state
        .services
        .adjustments
        .approve_adjustment(id, review.supervisor, review.comment)
        .await?;
    Ok(Json(approved))
}

async fn reject_adjustment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let comment = review.comment.unwrap_or_default();
    let rejected = state
        .services
        .adjustments
        .reject_adjustment(id, review.supervisor, comment)
        .await?;
    Ok(Json(rejected))
}
