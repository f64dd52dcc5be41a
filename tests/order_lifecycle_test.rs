mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::TestApp;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use warehouse_api::entities::{stock, stock_movement};
use warehouse_api::errors::ServiceError;
use warehouse_api::services::orders::{
    CreateOrderInput, OrderFilter, OrderItemInput, UpdateOrderInput,
};

fn order_input(sku: &str, quantity: i32, location_code: &str) -> CreateOrderInput {
    CreateOrderInput {
        seller: Some("acme".to_string()),
        customer_name: "Jordan Tester".to_string(),
        customer_address: "1 Dock Road".to_string(),
        contact_name: "Jordan".to_string(),
        contact_phone: "555-0100".to_string(),
        payment_method: None,
        estimated_arrival_time: Some(Utc::now() + Duration::days(2)),
        items: vec![OrderItemInput {
            sku: sku.to_string(),
            quantity,
            location_code: Some(location_code.to_string()),
        }],
    }
}

async fn stock_quantity(app: &TestApp, stock_id: uuid::Uuid) -> i32 {
    stock::Entity::find_by_id(stock_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap()
        .quantity
}

#[tokio::test]
async fn full_lifecycle_from_creation_to_closure() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;
    let row = app.seed_stock("WIDGET-1", "WH-A", 20).await;
    assert_eq!(row.quantity, 120);

    let created = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 50, "WH-A"))
        .await
        .unwrap();
    assert_eq!(created.order.status, "created");
    assert_eq!(created.items.len(), 1);
    assert!(!created.items[0].reserved);

    // Reservation validates availability but moves nothing.
    let reserved = app
        .services
        .orders
        .reserve_order(created.order.id, Some("picker".to_string()))
        .await
        .unwrap();
    assert_eq!(reserved.order.status, "reserved");
    assert!(reserved.items[0].reserved);
    assert_eq!(stock_quantity(&app, row.id).await, 120);

    // Dispatch decrements stock and raises the delivery alert from the ETA.
    let dispatched = app
        .services
        .orders
        .dispatch_order(created.order.id, Some("driver".to_string()))
        .await
        .unwrap();
    assert_eq!(dispatched.order.status, "dispatched");
    assert!(dispatched.order.departure_time.is_some());
    assert!(!dispatched.items[0].reserved);
    assert_eq!(stock_quantity(&app, row.id).await, 70);

    let alert = dispatched.delivery_alert.expect("ETA should raise an alert");
    assert!(!alert.resolved);
    assert_eq!(alert.order_id, created.order.id);

    let movement = stock_movement::Entity::find()
        .filter(stock_movement::Column::MovementType.eq("order-dispatch"))
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(movement.quantity, 50);
    assert_eq!(movement.actor.as_deref(), Some("driver"));

    // Closing records arrival and resolves the alert; stock already moved.
    let closed = app
        .services
        .orders
        .close_order(created.order.id, None)
        .await
        .unwrap();
    assert_eq!(closed.order.status, "closed");
    assert!(closed.order.actual_arrival_time.is_some());
    assert!(closed.delivery_alert.unwrap().resolved);
    assert_eq!(stock_quantity(&app, row.id).await, 70);
}

#[tokio::test]
async fn lifecycle_transitions_are_guarded() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let created = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 10, "WH-A"))
        .await
        .unwrap();

    // A created order cannot skip reservation.
    let err = app
        .services
        .orders
        .dispatch_order(created.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::StateConflict(_));

    let err = app
        .services
        .orders
        .close_order(created.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::StateConflict(_));

    app.services
        .orders
        .reserve_order(created.order.id, None)
        .await
        .unwrap();
    app.services
        .orders
        .dispatch_order(created.order.id, None)
        .await
        .unwrap();

    // Dispatched orders are frozen: no edits, no deletion, no re-dispatch.
    let err = app
        .services
        .orders
        .update_order(created.order.id, UpdateOrderInput::default())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::StateConflict(_));

    let err = app.services.orders.delete_order(created.order.id).await.unwrap_err();
    assert_matches!(err, ServiceError::StateConflict(_));

    let err = app
        .services
        .orders
        .dispatch_order(created.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::StateConflict(_));
}

#[tokio::test]
async fn reservation_fails_when_stock_is_short() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 30).await;

    let created = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 50, "WH-A"))
        .await
        .unwrap();

    let err = app
        .services
        .orders
        .reserve_order(created.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));

    let details = app.services.orders.get_order(created.order.id).await.unwrap();
    assert_eq!(details.order.status, "created");
    assert!(!details.items[0].reserved);
}

#[tokio::test]
async fn short_dispatch_rolls_back_completely() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_product("WIDGET-2").await;
    app.seed_location("WH-A", 0).await;
    let first = app.seed_stock("WIDGET-1", "WH-A", 100).await;
    let second = app.seed_stock("WIDGET-2", "WH-A", 100).await;

    let mut input = order_input("WIDGET-1", 60, "WH-A");
    input.items.push(OrderItemInput {
        sku: "WIDGET-2".to_string(),
        quantity: 10,
        location_code: Some("WH-A".to_string()),
    });
    let created = app.services.orders.create_order(input).await.unwrap();
    app.services
        .orders
        .reserve_order(created.order.id, None)
        .await
        .unwrap();

    // Availability was only checked, not held: a competing dispatch can
    // still drain the stock in between.
    let competing = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 80, "WH-A"))
        .await
        .unwrap();
    app.services
        .orders
        .reserve_order(competing.order.id, None)
        .await
        .unwrap();
    app.services
        .orders
        .dispatch_order(competing.order.id, None)
        .await
        .unwrap();
    assert_eq!(stock_quantity(&app, first.id).await, 20);

    let err = app
        .services
        .orders
        .dispatch_order(created.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // Nothing from the failed dispatch stuck, including the second item.
    assert_eq!(stock_quantity(&app, first.id).await, 20);
    assert_eq!(stock_quantity(&app, second.id).await, 100);
    let details = app.services.orders.get_order(created.order.id).await.unwrap();
    assert_eq!(details.order.status, "reserved");
}

#[tokio::test]
async fn concurrent_dispatches_never_oversell() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    let row = app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let first = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 60, "WH-A"))
        .await
        .unwrap();
    let second = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 60, "WH-A"))
        .await
        .unwrap();

    // Reservation holds nothing, so both orders reserve the same units.
    app.services
        .orders
        .reserve_order(first.order.id, None)
        .await
        .unwrap();
    app.services
        .orders
        .reserve_order(second.order.id, None)
        .await
        .unwrap();

    // Both dispatches in flight at once, with combined demand over stock.
    let (a, b) = tokio::join!(
        app.services.orders.dispatch_order(first.order.id, None),
        app.services.orders.dispatch_order(second.order.id, None),
    );

    let (winner, loser) = match (&a, &b) {
        (Ok(won), Err(lost)) => (won, lost),
        (Err(lost), Ok(won)) => (won, lost),
        outcome => panic!("expected exactly one dispatch to win, got {:?}", outcome),
    };
    assert_matches!(loser, ServiceError::InsufficientStock(_));
    assert_eq!(winner.order.status, "dispatched");

    // Whichever side won, exactly 60 units left and nothing went negative.
    assert_eq!(stock_quantity(&app, row.id).await, 40);
}

#[tokio::test]
async fn editing_a_reserved_order_rechecks_the_reservation() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let created = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 40, "WH-A"))
        .await
        .unwrap();
    app.services
        .orders
        .reserve_order(created.order.id, None)
        .await
        .unwrap();

    // Raising the quantity within availability re-reserves silently.
    let outcome = app
        .services
        .orders
        .update_order(
            created.order.id,
            UpdateOrderInput {
                items: Some(vec![OrderItemInput {
                    sku: "WIDGET-1".to_string(),
                    quantity: 90,
                    location_code: Some("WH-A".to_string()),
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(outcome.reservation_warning.is_none());
    assert_eq!(outcome.order.status, "reserved");

    // Raising it beyond availability keeps the edit but reports the failure.
    let outcome = app
        .services
        .orders
        .update_order(
            created.order.id,
            UpdateOrderInput {
                items: Some(vec![OrderItemInput {
                    sku: "WIDGET-1".to_string(),
                    quantity: 150,
                    location_code: Some("WH-A".to_string()),
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(outcome.reservation_warning.is_some());
    assert_eq!(outcome.order.status, "created");

    let details = app.services.orders.get_order(created.order.id).await.unwrap();
    assert_eq!(details.items[0].quantity, 150);
}

#[tokio::test]
async fn reservation_requires_items_with_locations() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let mut input = order_input("WIDGET-1", 10, "WH-A");
    input.items.clear();
    let empty = app.services.orders.create_order(input).await.unwrap();
    let err = app
        .services
        .orders
        .reserve_order(empty.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    let mut input = order_input("WIDGET-1", 10, "WH-A");
    input.items[0].location_code = None;
    let unassigned = app.services.orders.create_order(input).await.unwrap();
    let err = app
        .services
        .orders
        .reserve_order(unassigned.order.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn deleting_an_open_order_removes_its_rows() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let created = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 10, "WH-A"))
        .await
        .unwrap();
    app.services.orders.delete_order(created.order.id).await.unwrap();

    let err = app
        .services
        .orders
        .get_order(created.order.id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn listing_filters_by_status_and_seller() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 100).await;

    let first = app
        .services
        .orders
        .create_order(order_input("WIDGET-1", 10, "WH-A"))
        .await
        .unwrap();
    let mut other = order_input("WIDGET-1", 5, "WH-A");
    other.seller = Some("globex".to_string());
    app.services.orders.create_order(other).await.unwrap();

    app.services
        .orders
        .reserve_order(first.order.id, None)
        .await
        .unwrap();

    let reserved = app
        .services
        .orders
        .list_orders(OrderFilter {
            status: Some("reserved".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].id, first.order.id);

    let by_seller = app
        .services
        .orders
        .list_orders(OrderFilter {
            seller: Some("globex".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_seller.len(), 1);
}
