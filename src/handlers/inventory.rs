use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::errors::ServiceError;
use crate::services::catalog::StockFilter;
use crate::services::ingress::IngressInput;
use crate::AppState;

pub fn stock_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stock_levels))
        .route("/ingress", post(register_ingress))
}

/// Current stock rows, optionally filtered by `sku` and `location_code`.
async fn stock_levels(
    State(state): State<AppState>,
    Query(filter): Query<StockFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let levels = state.services.catalog.stock_levels(filter).await?;
    Ok(Json(levels))
}

/// Books received goods into a location and returns the updated stock row
/// together with the journal and audit entries it produced.
async fn register_ingress(
    State(state): State<AppState>,
    Json(input): Json<IngressInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state.services.ingress.register_ingress(input).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
