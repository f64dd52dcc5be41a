//! Warehouse back office: stock ledger, movement journal, proposal queues
//! and order fulfillment over a relational store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::db::DbPool;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(
        db: Arc<DbPool>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        let services = handlers::AppServices::new(
            db.clone(),
            Arc::new(event_sender.clone()),
            config.adjustment_tolerance,
        );
        Self {
            db,
            config,
            event_sender,
            services,
        }
    }
}

/// All v1 routes, grouped per resource the way the handler modules are.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::catalog::products_router())
        .nest("/locations", handlers::catalog::locations_router())
        .nest("/stock", handlers::inventory::stock_router())
        .nest("/adjustments", handlers::adjustments::adjustments_router())
        .nest("/transfers", handlers::transfers::transfers_router())
        .nest("/orders", handlers::orders::orders_router())
        .nest("/history", handlers::history::history_router())
}

/// Liveness plus a database ping.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match db::check_connection(state.db.as_ref()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "up" })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "down" })),
        ),
    }
}

/// Full application router, ready to be served once given an [`AppState`].
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "warehouse-api up" }))
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::timeout::TimeoutLayer::new(
            std::time::Duration::from_secs(state.config.request_timeout_secs),
        ))
        .with_state(state)
}
