use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::handlers::OperatorRequest;
use crate::services::orders::{CreateOrderInput, OrderFilter, UpdateOrderInput};
use crate::AppState;

pub fn orders_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/:id/reserve", post(reserve_order))
        .route("/:id/dispatch", post(dispatch_order))
        .route("/:id/close", post(close_order))
}

async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let details = state.services.orders.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let details = state.services.orders.get_order(id).await?;
    Ok(Json(details))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.list_orders(filter).await?;
    Ok(Json(orders))
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let outcome = state.services.orders.update_order(id, input).await?;
    Ok(Json(outcome))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reserve_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<OperatorRequest>>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = body.and_then(|Json(b)| b.operator);
    let details = state.services.orders.reserve_order(id, operator).await?;
    Ok(Json(details))
}

async fn dispatch_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<OperatorRequest>>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = body.and_then(|Json(b)| b.operator);
    let details = state.services.orders.dispatch_order(id, operator).await?;
    Ok(Json(details))
}

async fn close_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<OperatorRequest>>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = body.and_then(|Json(b)| b.operator);
    let details = state.services.orders.close_order(id, operator).await?;
    Ok(Json(details))
}
