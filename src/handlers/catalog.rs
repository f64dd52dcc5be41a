use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::services::catalog::{
    CreateLocationInput, CreateProductInput, UpdateLocationInput, UpdateProductInput,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

pub fn products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:sku",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub fn locations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:code",
            get(get_location)
                .put(update_location)
                .delete(delete_location),
        )
}

async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.catalog.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.catalog.get_product(&sku).await?;
    Ok(Json(product))
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.catalog.list_products(query.limit).await?;
    Ok(Json(products))
}

async fn update_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.catalog.update_product(&sku, input).await?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete_product(&sku).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.catalog.create_location(input).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn get_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.catalog.get_location(&code).await?;
    Ok(Json(location))
}

async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let locations = state.services.catalog.list_locations(query.limit).await?;
    Ok(Json(locations))
}

async fn update_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateLocationInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.catalog.update_location(&code, input).await?;
    Ok(Json(location))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete_location(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
