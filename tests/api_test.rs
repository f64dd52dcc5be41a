mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;
use warehouse_api::{app_router, config::AppConfig, events, AppState};

use common::TestApp;

async fn test_router() -> axum::Router {
    let app = TestApp::new().await;
    let cfg = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        18_080,
        "test".to_string(),
    );
    let (tx, rx) = mpsc::channel(64);
    let event_sender = events::EventSender::new(tx);
    tokio::spawn(events::process_events(rx));
    app_router(AppState::new(app.db.clone(), cfg, event_sender))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_database_status() {
    let router = test_router().await;
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn stock_flows_through_the_http_surface() {
    let router = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/products",
            json!({ "sku": "WIDGET-1", "name": "Widget" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/locations",
            json!({ "code": "WH-A", "capacity": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/stock/ingress",
            json!({ "sku": "WIDGET-1", "location_code": "WH-A", "quantity": 40 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["stock"]["quantity"], 40);
    assert_eq!(body["movement"]["movement_type"], "ingress");

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/stock?sku=WIDGET-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn errors_map_to_the_documented_status_codes() {
    let router = test_router().await;

    // Unknown product: 404.
    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/products/GHOST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");

    // Invalid payload semantics: 400.
    router
        .clone()
        .oneshot(post_json(
            "/api/v1/products",
            json!({ "sku": "WIDGET-1", "name": "Widget" }),
        ))
        .await
        .unwrap();
    router
        .clone()
        .oneshot(post_json(
            "/api/v1/locations",
            json!({ "code": "WH-A", "capacity": 0 }),
        ))
        .await
        .unwrap();
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/stock/ingress",
            json!({ "sku": "WIDGET-1", "location_code": "WH-A", "quantity": -1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Duplicate SKU: 409.
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/products",
            json!({ "sku": "WIDGET-1", "name": "Widget again" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Reserving against empty stock: 422.
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/orders",
            json!({
                "customer_name": "Jordan Tester",
                "customer_address": "1 Dock Road",
                "contact_name": "Jordan",
                "contact_phone": "555-0100",
                "items": [
                    { "sku": "WIDGET-1", "quantity": 5, "location_code": "WH-A" }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let order_id = body["order"]["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/reserve", order_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unprocessable Entity");
}
