use crate::{
    db::DbPool,
    entities::{
        stock,
        stock_audit::{self, MovementDirection},
        stock_movement::{self, MovementType},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{journal, lookup},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set, TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct IngressInput {
    pub sku: String,
    pub location_code: String,
    pub quantity: i32,
    pub observations: Option<String>,
    pub actor: Option<String>,
}

/// Everything a successful ingress produced, returned to the caller in one piece.
#[derive(Debug, Clone, Serialize)]
pub struct IngressReceipt {
    pub stock: stock::Model,
    pub movement: stock_movement::Model,
    pub audit: stock_audit::Model,
}

pub struct IngressService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl IngressService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records inbound stock: lock-or-create the stock row, add the quantity,
    /// and journal a movement plus an audit record in the same transaction.
    #[instrument(skip(self), fields(sku = %input.sku, location = %input.location_code))]
    pub async fn register_ingress(
        &self,
        input: IngressInput,
    ) -> Result<IngressReceipt, ServiceError> {
        if input.quantity <= 0 {
            return Err(ServiceError::ValidationError(format!(
                "ingress quantity must be positive, got {}",
                input.quantity
            )));
        }

        let db = self.db_pool.as_ref();
        let receipt = db
            .transaction::<_, IngressReceipt, ServiceError>(move |txn| {
                Box::pin(async move {
                    let product = lookup::find_product_by_sku(txn, &input.sku).await?;
                    let location = lookup::find_location_by_code(txn, &input.location_code).await?;

                    let existing = lookup::lock_stock_row(txn, product.id, location.id).await?;

                    let (previous, updated_stock) = match existing {
                        Some(row) => {
                            let previous = row.quantity;
                            let mut active: stock::ActiveModel = row.into();
                            active.quantity = Set(previous + input.quantity);
                            active.updated_at = Set(Utc::now());
                            let updated =
                                active.update(txn).await.map_err(ServiceError::db_error)?;
                            (previous, updated)
                        }
                        None => {
                            let created = stock::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                product_id: Set(product.id),
                                location_id: Set(location.id),
                                quantity: Set(input.quantity),
                                custom_reorder_point: Set(None),
                                updated_at: Set(Utc::now()),
                            }
                            .insert(txn)
                            .await
                            .map_err(ServiceError::db_error)?;
                            (0, created)
                        }
                    };

                    let movement = journal::record_movement(
                        txn,
                        product.id,
                        location.id,
                        MovementType::Ingress,
                        input.quantity,
                        input.actor.as_deref(),
                    )
                    .await?;

                    let audit = journal::record_audit(
                        txn,
                        product.id,
                        location.id,
                        MovementDirection::Ingress,
                        input.quantity,
                        previous,
                        updated_stock.quantity,
                        input.observations.as_deref().unwrap_or(""),
                        input.actor.as_deref(),
                    )
                    .await?;

                    info!(
                        "Ingress of {} units: stock now {} at location {}",
                        input.quantity, updated_stock.quantity, location.code
                    );

                    Ok(IngressReceipt {
                        stock: updated_stock,
                        movement,
                        audit,
                    })
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::StockIngressRecorded {
                product_id: receipt.stock.product_id,
                location_id: receipt.stock.location_id,
                quantity: receipt.movement.quantity,
            })
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(receipt)
    }
}
