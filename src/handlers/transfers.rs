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
use crate::services::transfers::{CreateTransferInput, TransferFilter};
use crate::AppState;

pub fn transfers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route("/:id", get(get_transfer))
        .route("/:id/approve", post(approve_transfer))
        .route("/:id/reject", post(reject_transfer))
}

async fn create_transfer(
    State(state): State<AppState>,
    Json(input): Json<CreateTransferInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfer = state.services.transfers.create_transfer(input).await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfer = state.services.transfers.get_transfer(id).await?;
    Ok(Json(transfer))
}

async fn list_transfers(
    State(state): State<AppState>,
    Query(filter): Query<TransferFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfers = state.services.transfers.list_transfers(filter).await?;
    Ok(Json(transfers))
}

async fn approve_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let approved = state
        .services
        .transfers
        .approve_transfer(id, review.supervisor, review.comment)
        .await?;
    Ok(Json(approved))
}

async fn reject_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let comment = review.comment.unwrap_or_default();
    let rejected = state
        .services
        .transfers
        .reject_transfer(id, review.supervisor, comment)
        .await?;
    Ok(Json(rejected))
}
