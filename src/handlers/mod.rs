pub mod adjustments;
pub mod catalog;
pub mod history;
pub mod inventory;
pub mod orders;
pub mod transfers;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub ingress: Arc<crate::services::ingress::IngressService>,
    pub adjustments: Arc<crate::services::adjustments::AdjustmentService>,
    pub transfers: Arc<crate::services::transfers::TransferService>,
    pub orders: Arc<crate::services::orders::OrderService>,
    pub catalog: Arc<crate::services::catalog::CatalogService>,
    pub audit_log: Arc<crate::services::audit_log::AuditLogService>,
}

impl AppServices {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        adjustment_tolerance: u32,
    ) -> Self {
        Self {
            ingress: Arc::new(crate::services::ingress::IngressService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            adjustments: Arc::new(crate::services::adjustments::AdjustmentService::new(
                db_pool.clone(),
                event_sender.clone(),
                adjustment_tolerance,
            )),
            transfers: Arc::new(crate::services::transfers::TransferService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            orders: Arc::new(crate::services::orders::OrderService::new(
                db_pool.clone(),
                event_sender,
            )),
            catalog: Arc::new(crate::services::catalog::CatalogService::new(
                db_pool.clone(),
            )),
            audit_log: Arc::new(crate::services::audit_log::AuditLogService::new(db_pool)),
        }
    }
}

/// Body shared by the approve and reject endpoints of adjustments and
/// transfers.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ReviewRequest {
    pub supervisor: Option<String>,
    pub comment: Option<String>,
}

/// Body for order state transitions that want to record who triggered them.
#[derive(Debug, Default, serde::Deserialize)]
pub struct OperatorRequest {
    pub operator: Option<String>,
}
