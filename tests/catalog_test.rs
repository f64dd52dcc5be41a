mod common;

use assert_matches::assert_matches;
use common::TestApp;
use warehouse_api::errors::ServiceError;
use warehouse_api::services::catalog::{
    CreateLocationInput, CreateProductInput, StockFilter, UpdateLocationInput, UpdateProductInput,
};

#[tokio::test]
async fn category_blueprints_shape_new_products() {
    let app = TestApp::new().await;

    let product = app
        .services
        .catalog
        .create_product(CreateProductInput {
            sku: "MILK-1".to_string(),
            name: "Milk crate".to_string(),
            description: None,
            reorder_point: Some(3),
            category: Some("perishable".to_string()),
        })
        .await
        .unwrap();

    // The perishable floor overrides the too-low requested reorder point, and
    // the blueprint supplies a default description.
    assert_eq!(product.reorder_point, 15);
    assert_eq!(product.category, "perishable");
    assert!(!product.description.is_empty());

    let above_floor = app
        .services
        .catalog
        .create_product(CreateProductInput {
            sku: "MILK-2".to_string(),
            name: "Milk crate XL".to_string(),
            description: None,
            reorder_point: Some(40),
            category: Some("perishable".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(above_floor.reorder_point, 40);

    let err = app
        .services
        .catalog
        .create_product(CreateProductInput {
            sku: "ODD-1".to_string(),
            name: "Odd".to_string(),
            description: None,
            reorder_point: None,
            category: Some("imaginary".to_string()),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn skus_are_unique_and_immutable() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;

    let err = app
        .services
        .catalog
        .create_product(CreateProductInput {
            sku: "WIDGET-1".to_string(),
            name: "Duplicate".to_string(),
            description: None,
            reorder_point: None,
            category: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let updated = app
        .services
        .catalog
        .update_product(
            "WIDGET-1",
            UpdateProductInput {
                name: Some("Renamed widget".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.sku, "WIDGET-1");
    assert_eq!(updated.name, "Renamed widget");
}

#[tokio::test]
async fn referenced_products_and_locations_cannot_be_deleted() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_location("WH-A", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 10).await;

    let err = app.services.catalog.delete_product("WIDGET-1").await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let err = app.services.catalog.delete_location("WH-A").await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    // Unreferenced rows delete cleanly.
    app.seed_product("UNUSED").await;
    app.services.catalog.delete_product("UNUSED").await.unwrap();
    let err = app.services.catalog.get_product("UNUSED").await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn location_capacity_must_be_non_negative() {
    let app = TestApp::new().await;

    let err = app
        .services
        .catalog
        .create_location(CreateLocationInput {
            code: "BAD".to_string(),
            description: None,
            capacity: Some(-1),
            is_active: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));

    app.seed_location("WH-A", 100).await;
    let updated = app
        .services
        .catalog
        .update_location(
            "WH-A",
            UpdateLocationInput {
                capacity: Some(250),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 250);
    assert!(!updated.is_active);
}

#[tokio::test]
async fn stock_levels_narrow_by_product_and_location() {
    let app = TestApp::new().await;
    app.seed_product("WIDGET-1").await;
    app.seed_product("WIDGET-2").await;
    app.seed_location("WH-A", 0).await;
    app.seed_location("WH-B", 0).await;
    app.seed_stock("WIDGET-1", "WH-A", 10).await;
    app.seed_stock("WIDGET-1", "WH-B", 20).await;
    app.seed_stock("WIDGET-2", "WH-A", 30).await;

    let all = app
        .services
        .catalog
        .stock_levels(StockFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let for_product = app
        .services
        .catalog
        .stock_levels(StockFilter {
            sku: Some("WIDGET-1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_product.len(), 2);

    let for_pair = app
        .services
        .catalog
        .stock_levels(StockFilter {
            sku: Some("WIDGET-1".to_string()),
            location_code: Some("WH-B".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_pair.len(), 1);
    assert_eq!(for_pair[0].quantity, 20);

    // Unknown identifiers are an error here, unlike the history filters.
    let err = app
        .services
        .catalog
        .stock_levels(StockFilter {
            sku: Some("GHOST".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
