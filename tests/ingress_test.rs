mod common;

use assert_matches::assert_matches;
use common::TestApp;
use warehouse_api::errors::ServiceError;
use warehouse_api::services::audit_log::HistoryFilter;
use warehouse_api::services::ingress::IngressInput;

fn ingress_input(sku: &str, location_code: &str, quantity: i32) -> IngressInput {
    IngressInput {
        sku: sku.to_string(),
        location_code: location_code.to_string(),
        quantity,
        observations: Some("unit test delivery".to_string()),
        actor: Some("clerk".to_string()),
    }
}

#[tokio::test]
async fn ingress_creates_stock_row_and_history() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;

    let receipt = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", 40))
        .await
        .expect("ingress should succeed");

    assert_eq!(receipt.stock.quantity, 40);
    assert_eq!(receipt.movement.movement_type, "ingress");
    assert_eq!(receipt.movement.quantity, 40);
    assert_eq!(receipt.movement.actor.as_deref(), Some("clerk"));
    assert_eq!(receipt.audit.direction, "ingress");
    assert_eq!(receipt.audit.previous_stock, 0);
    assert_eq!(receipt.audit.new_stock, 40);
    assert_eq!(receipt.audit.observations, "unit test delivery");
}

#[tokio::test]
async fn repeated_ingress_accumulates_on_the_same_row() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;

    let first = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", 100))
        .await
        .unwrap();
    let second = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", 20))
        .await
        .unwrap();

    assert_eq!(second.stock.id, first.stock.id);
    assert_eq!(second.stock.quantity, 120);
    assert_eq!(second.audit.previous_stock, 100);
    assert_eq!(second.audit.new_stock, 120);
}

#[tokio::test]
async fn ingress_rejects_non_positive_quantities() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;

    let err = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", 0))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", -5))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn ingress_requires_known_product_and_location() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;

    let err = app
        .services
        .ingress
        .register_ingress(ingress_input("GHOST", "WH-A", 10))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let err = app
        .services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "NOWHERE", 10))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn history_filters_by_actor_and_movement_type() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;

    app.services
        .ingress
        .register_ingress(ingress_input("WIDGET-1", "WH-A", 10))
        .await
        .unwrap();
    app.services
        .ingress
        .register_ingress(IngressInput {
            actor: Some("other".to_string()),
            ..ingress_input("WIDGET-1", "WH-A", 5)
        })
        .await
        .unwrap();

    let movements = app
        .services
        .audit_log
        .list_movements(HistoryFilter {
            actor: Some("clerk".to_string()),
            movement_type: Some("ingress".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, 10);

    let err = app
        .services
        .audit_log
        .list_movements(HistoryFilter {
            movement_type: Some("teleport".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}
