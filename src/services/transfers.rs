use crate::{
    db::DbPool,
    entities::{
        internal_transfer::{self, Entity as InternalTransfer, ReviewStatus},
        location, product, stock,
        stock_audit::MovementDirection,
        stock_movement::MovementType,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{journal, lookup},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionError, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransferInput {
    pub sku: String,
    pub quantity: i32,
    pub origin_code: String,
    pub destination_code: String,
    pub reason: Option<String>,
    pub destination_reorder_point: Option<i32>,
    pub actor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferFilter {
    pub status: Option<String>,
    pub sku: Option<String>,
    pub limit: Option<u64>,
}

pub struct TransferService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl TransferService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Opens a relocation proposal between two different locations.
    #[instrument(skip(self), fields(sku = %input.sku))]
    pub async fn create_transfer(
        &self,
        input: CreateTransferInput,
    ) -> Result<internal_transfer::Model, ServiceError> {
        if input.quantity <= 0 {
            return Err(ServiceError::ValidationError(format!(
                "transfer quantity must be positive, got {}",
                input.quantity
            )));
        }
        if input.origin_code == input.destination_code {
            return Err(ServiceError::ValidationError(
                "origin and destination locations must differ".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();
        let product = lookup::find_product_by_sku(db, &input.sku).await?;
        let origin = lookup::find_location_by_code(db, &input.origin_code).await?;
        let destination = lookup::find_location_by_code(db, &input.destination_code).await?;

        let created = internal_transfer::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            origin_location_id: Set(origin.id),
            destination_location_id: Set(destination.id),
            quantity: Set(input.quantity),
            reason: Set(input.reason.unwrap_or_default()),
            destination_reorder_point: Set(input.destination_reorder_point),
            status: Set(ReviewStatus::Pending.as_str().to_string()),
            created_by: Set(input.actor),
            created_at: Set(Utc::now()),
            processed_by: Set(None),
            processed_at: Set(None),
            resolution_comment: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::TransferRequested(created.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(created)
    }

    /// Executes a pending transfer. Origin stock is always locked before
    /// destination stock, so transfers moving in the same direction contend
    /// for the two rows in a fixed order.
    #[instrument(skip(self))]
    pub async fn approve_transfer(
        &self,
        id: Uuid,
        supervisor: Option<String>,
        comment: Option<String>,
    ) -> Result<internal_transfer::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let approved = db
            .transaction::<_, internal_transfer::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let transfer = InternalTransfer::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("transfer {}", id)))?;

                    if transfer.status()? != ReviewStatus::Pending {
                        return Err(ServiceError::StateConflict(format!(
                            "transfer {} is already {}, expected pending",
                            id, transfer.status
                        )));
                    }
                    // Re-validated here: nothing guards these fields between
                    // creation and approval.
                    if transfer.quantity <= 0 {
                        return Err(ServiceError::ValidationError(format!(
                            "transfer quantity must be positive, got {}",
                            transfer.quantity
                        )));
                    }
                    if transfer.origin_location_id == transfer.destination_location_id {
                        return Err(ServiceError::ValidationError(
                            "origin and destination locations must differ".to_string(),
                        ));
                    }

                    let origin = location::Entity::find_by_id(transfer.origin_location_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "location {}",
                                transfer.origin_location_id
                            ))
                        })?;

                    let origin_stock =
                        lookup::lock_stock_row(txn, transfer.product_id, origin.id)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InsufficientStock(format!(
                                    "no stock at origin location {}",
                                    origin.code
                                ))
                            })?;

                    if origin_stock.quantity < transfer.quantity {
                        return Err(ServiceError::InsufficientStock(format!(
                            "origin location {} holds {} units, transfer needs {}",
                            origin.code, origin_stock.quantity, transfer.quantity
                        )));
                    }

                    let destination_stock = lookup::lock_stock_row(
                        txn,
                        transfer.product_id,
                        transfer.destination_location_id,
                    )
                    .await?;

                    let origin_previous = origin_stock.quantity;
                    let mut origin_active: stock::ActiveModel = origin_stock.into();
                    origin_active.quantity = Set(origin_previous - transfer.quantity);
                    origin_active.updated_at = Set(Utc::now());
                    let origin_updated = origin_active
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let (destination_previous, destination_updated) = match destination_stock {
                        Some(row) => {
                            let previous = row.quantity;
                            let mut active: stock::ActiveModel = row.into();
                            active.quantity = Set(previous + transfer.quantity);
                            active.updated_at = Set(Utc::now());
                            let updated =
                                active.update(txn).await.map_err(ServiceError::db_error)?;
                            (previous, updated)
                        }
                        None => {
                            // First stock at the destination: seed the pair's
                            // reorder override from the transfer, if given.
                            let created = stock::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                product_id: Set(transfer.product_id),
                                location_id: Set(transfer.destination_location_id),
                                quantity: Set(transfer.quantity),
                                custom_reorder_point: Set(transfer.destination_reorder_point),
                                updated_at: Set(Utc::now()),
                            }
                            .insert(txn)
                            .await
                            .map_err(ServiceError::db_error)?;
                            (0, created)
                        }
                    };

                    journal::record_movement(
                        txn,
                        transfer.product_id,
                        transfer.origin_location_id,
                        MovementType::TransferEgress,
                        transfer.quantity,
                        supervisor.as_deref(),
                    )
                    .await?;
                    journal::record_movement(
                        txn,
                        transfer.product_id,
                        transfer.destination_location_id,
                        MovementType::TransferIngress,
                        transfer.quantity,
                        supervisor.as_deref(),
                    )
                    .await?;

                    journal::record_audit(
                        txn,
                        transfer.product_id,
                        transfer.origin_location_id,
                        MovementDirection::Egress,
                        transfer.quantity,
                        origin_previous,
                        origin_updated.quantity,
                        &transfer.reason,
                        supervisor.as_deref(),
                    )
                    .await?;
                    journal::record_audit(
                        txn,
                        transfer.product_id,
                        transfer.destination_location_id,
                        MovementDirection::Ingress,
                        transfer.quantity,
                        destination_previous,
                        destination_updated.quantity,
                        &transfer.reason,
                        supervisor.as_deref(),
                    )
                    .await?;

                    let mut active_transfer: internal_transfer::ActiveModel =
                        transfer.clone().into();
                    active_transfer.status = Set(ReviewStatus::Approved.as_str().to_string());
                    active_transfer.processed_by = Set(supervisor);
                    active_transfer.processed_at = Set(Some(Utc::now()));
                    active_transfer.resolution_comment = Set(comment);
                    let approved = active_transfer
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    info!(
                        "Transfer {} approved: {} units moved",
                        approved.id, approved.quantity
                    );

                    Ok(approved)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::StockTransferred {
                product_id: approved.product_id,
                origin_location_id: approved.origin_location_id,
                destination_location_id: approved.destination_location_id,
                quantity: approved.quantity,
            })
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(approved)
    }

    /// Declines a pending transfer. No stock moves; a zero-quantity journal
    /// entry at the origin keeps the decision traceable.
    #[instrument(skip(self))]
    pub async fn reject_transfer(
        &self,
        id: Uuid,
        supervisor: Option<String>,
        comment: String,
    ) -> Result<internal_transfer::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "a comment is required when rejecting a transfer".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();
        let rejected = db
            .transaction::<_, internal_transfer::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let transfer = InternalTransfer::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("transfer {}", id)))?;

                    if transfer.status()? != ReviewStatus::Pending {
                        return Err(ServiceError::StateConflict(format!(
                            "transfer {} is already {}, expected pending",
                            id, transfer.status
                        )));
                    }

                    journal::record_movement(
                        txn,
                        transfer.product_id,
                        transfer.origin_location_id,
                        MovementType::TransferRejected,
                        0,
                        supervisor.as_deref(),
                    )
                    .await?;

                    let mut active: internal_transfer::ActiveModel = transfer.into();
                    active.status = Set(ReviewStatus::Rejected.as_str().to_string());
                    active.processed_by = Set(supervisor);
                    active.processed_at = Set(Some(Utc::now()));
                    active.resolution_comment = Set(Some(comment));
                    active.update(txn).await.map_err(ServiceError::db_error)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        self.event_sender
            .send(Event::TransferRejected(rejected.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(rejected)
    }

    pub async fn get_transfer(&self, id: Uuid) -> Result<internal_transfer::Model, ServiceError> {
        InternalTransfer::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("transfer {}", id)))
    }

    /// Lists transfers, newest first. An unknown SKU filter matches nothing.
    pub async fn list_transfers(
        &self,
        filter: TransferFilter,
    ) -> Result<Vec<internal_transfer::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let mut query = InternalTransfer::find();

        if let Some(status) = &filter.status {
            let status = ReviewStatus::parse(status).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown status filter {}", status))
            })?;
            query = query.filter(internal_transfer::Column::Status.eq(status.as_str()));
        }
        if let Some(sku) = &filter.sku {
            let product_id = product::Entity::find()
                .filter(product::Column::Sku.eq(sku))
                .one(db)
                .await
                .map_err(ServiceError::db_error)?
                .map(|p| p.id)
                .unwrap_or_else(Uuid::nil);
            query = query.filter(internal_transfer::Column::ProductId.eq(product_id));
        }

        query
            .order_by_desc(internal_transfer::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(db)
            .await
            .map_err(ServiceError::db_error)
    }
}
