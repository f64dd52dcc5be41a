use std::sync::Arc;

use tokio::sync::mpsc;
use warehouse_api::{
    db::{establish_connection_with_config, run_migrations, DbConfig, DbPool},
    entities::{location, product, stock},
    events::{self, EventSender},
    handlers::AppServices,
    services::catalog::{CreateLocationInput, CreateProductInput},
    services::ingress::IngressInput,
};

/// Harness backed by an in-memory SQLite database. A single pooled connection
/// keeps the database alive for the lifetime of the harness.
pub struct TestApp {
    pub db: Arc<DbPool>,
    pub services: AppServices,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_tolerance(0).await
    }

    pub async fn with_tolerance(adjustment_tolerance: u32) -> Self {
        let cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let db = Arc::new(
            establish_connection_with_config(&cfg)
                .await
                .expect("failed to open in-memory database"),
        );
        run_migrations(db.as_ref())
            .await
            .expect("failed to run migrations");

        let (tx, rx) = mpsc::channel(64);
        let event_sender = Arc::new(EventSender::new(tx));
        let event_task = tokio::spawn(events::process_events(rx));

        let services = AppServices::new(db.clone(), event_sender, adjustment_tolerance);

        Self {
            db,
            services,
            _event_task: event_task,
        }
    }

    pub async fn seed_product(&self, sku: &str) -> product::Model {
        self.services
            .catalog
            .create_product(CreateProductInput {
                sku: sku.to_string(),
                name: format!("{} test product", sku),
                description: None,
                reorder_point: None,
                category: None,
            })
            .await
            .expect("failed to seed product")
    }

    pub async fn seed_location(&self, code: &str, capacity: i32) -> location::Model {
        self.services
            .catalog
            .create_location(CreateLocationInput {
                code: code.to_string(),
                description: None,
                capacity: Some(capacity),
                is_active: None,
            })
            .await
            .expect("failed to seed location")
    }

    /// Books `quantity` units of `sku` into `location_code` and returns the
    /// resulting stock row.
    pub async fn seed_stock(&self, sku: &str, location_code: &str, quantity: i32) -> stock::Model {
        self.services
            .ingress
            .register_ingress(IngressInput {
                sku: sku.to_string(),
                location_code: location_code.to_string(),
                quantity,
                observations: None,
                actor: None,
            })
            .await
            .expect("failed to seed stock")
            .stock
    }
}
