use crate::{
    db::DbPool,
    entities::{
        adjustment_request::{self, Entity as AdjustmentRequest, ReviewStatus},
        location, product, stock,
        stock_audit::MovementDirection,
        stock_movement::MovementType,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{capacity, journal, lookup},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionError, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdjustmentInput {
    pub sku: String,
    pub location_code: String,
    pub physical_quantity: i32,
    pub reason: String,
    pub attachment_url: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjustmentFilter {
    pub status: Option<String>,
    pub sku: Option<String>,
    pub location_code: Option<String>,
    pub limit: Option<u64>,
}

pub struct AdjustmentService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    /// Discrepancy magnitude above which a new request is flagged.
    /// Zero disables flagging.
    tolerance: u32,
}

impl AdjustmentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>, tolerance: u32) -> Self {
        Self {
            db_pool,
            event_sender,
            tolerance,
        }
    }

    /// Opens a reconciliation proposal. The stock quantity is read without a
    /// lock: it is an advisory snapshot, and approval re-reads under lock.
    #[instrument(skip(self), fields(sku = %input.sku, location = %input.location_code))]
    pub async fn create_adjustment(
        &self,
        input: CreateAdjustmentInput,
    ) -> Result<adjustment_request::Model, ServiceError> {
        if input.physical_quantity < 0 {
            return Err(ServiceError::ValidationError(format!(
                "physical quantity must be non-negative, got {}",
                input.physical_quantity
            )));
        }
        if input.reason.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "adjustment reason is required".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();
        let product = lookup::find_product_by_sku(db, &input.sku).await?;
        let location = lookup::find_location_by_code(db, &input.location_code).await?;

        let system_quantity = stock::Entity::find()
            .filter(stock::Column::ProductId.eq(product.id))
            .filter(stock::Column::LocationId.eq(location.id))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .map(|row| row.quantity)
            .unwrap_or(0);

        let delta = input.physical_quantity - system_quantity;
        if delta == 0 {
            return Err(ServiceError::ValidationError(
                "physical count matches system quantity, no adjustment needed".to_string(),
            ));
        }

        let flagged = self.tolerance > 0 && delta.unsigned_abs() > self.tolerance;

        let created = adjustment_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product.id),
            location_id: Set(location.id),
            system_quantity: Set(system_quantity),
            physical_quantity: Set(input.physical_quantity),
            delta: Set(delta),
            reason: Set(input.reason),
            attachment_url: Set(input.attachment_url.unwrap_or_default()),
            flagged: Set(flagged),
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

        if flagged {
            warn!(
                adjustment_id = %created.id,
                delta,
                tolerance = self.tolerance,
                "Adjustment flagged: discrepancy exceeds tolerance"
            );
        }

        self.event_sender
            .send(Event::AdjustmentRequested {
                adjustment_id: created.id,
                flagged,
            })
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(created)
    }

    /// Applies a pending adjustment: the stock row is locked, the location's
    /// occupancy re-checked, and the quantity set to the counted value. This
    /// is a reconciliation, never an increment.
    #[instrument(skip(self))]
    pub async fn approve_adjustment(
        &self,
        id: Uuid,
        supervisor: Option<String>,
        comment: Option<String>,
    ) -> Result<adjustment_request::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let approved = db
            .transaction::<_, adjustment_request::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let request = AdjustmentRequest::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("adjustment request {}", id))
                        })?;

                    if request.status()? != ReviewStatus::Pending {
                        return Err(ServiceError::StateConflict(format!(
                            "adjustment request {} is already {}, expected pending",
                            id, request.status
                        )));
                    }

                    let location = location::Entity::find_by_id(request.location_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("location {}", request.location_id))
                        })?;

                    let stock_row =
                        lookup::lock_stock_row(txn, request.product_id, request.location_id)
                            .await?;

                    // The row can have vanished only if it never existed;
                    // recreate it at the recorded system quantity so the
                    // reconciliation applies cleanly.
                    let stock_row = match stock_row {
                        Some(row) => row,
                        None => stock::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            product_id: Set(request.product_id),
                            location_id: Set(request.location_id),
                            quantity: Set(request.system_quantity),
                            custom_reorder_point: Set(None),
                            updated_at: Set(Utc::now()),
                        }
                        .insert(txn)
                        .await
                        .map_err(ServiceError::db_error)?,
                    };

                    let others_total =
                        capacity::location_total_stock(txn, location.id, Some(stock_row.id))
                            .await?;
                    capacity::check_capacity(
                        &location,
                        others_total,
                        request.physical_quantity as i64,
                        0,
                    )?;

                    let previous = stock_row.quantity;
                    let mut active: stock::ActiveModel = stock_row.into();
                    active.quantity = Set(request.physical_quantity);
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    journal::record_movement(
                        txn,
                        request.product_id,
                        request.location_id,
                        MovementType::AdjustmentApproved,
                        request.delta,
                        supervisor.as_deref(),
                    )
                    .await?;

                    let direction = if request.delta >= 0 {
                        MovementDirection::Ingress
                    } else {
                        MovementDirection::Egress
                    };
                    journal::record_audit(
                        txn,
                        request.product_id,
                        request.location_id,
                        direction,
                        request.delta.abs(),
                        previous,
                        request.physical_quantity,
                        &request.reason,
                        supervisor.as_deref(),
                    )
                    .await?;

                    let mut active_request: adjustment_request::ActiveModel =
                        request.clone().into();
                    active_request.status = Set(ReviewStatus::Approved.as_str().to_string());
                    active_request.processed_by = Set(supervisor);
                    active_request.processed_at = Set(Some(Utc::now()));
                    active_request.resolution_comment = Set(comment);
                    let approved = active_request
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    info!(
                        "Adjustment {} approved: stock reconciled from {} to {}",
                        approved.id, previous, approved.physical_quantity
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
            .send(Event::StockAdjusted {
                product_id: approved.product_id,
                location_id: approved.location_id,
                old_quantity: approved.system_quantity,
                new_quantity: approved.physical_quantity,
            })
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(approved)
    }

    /// Declines a pending adjustment. Stock is untouched; a zero-quantity
    /// journal entry keeps the decision traceable.
    #[instrument(skip(self))]
    pub async fn reject_adjustment(
        &self,
        id: Uuid,
        supervisor: Option<String>,
        comment: String,
    ) -> Result<adjustment_request::Model, ServiceError> {
        if comment.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "a comment is required when rejecting an adjustment".to_string(),
            ));
        }

        let db = self.db_pool.as_ref();
        let rejected = db
            .transaction::<_, adjustment_request::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let request = AdjustmentRequest::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("adjustment request {}", id))
                        })?;

                    if request.status()? != ReviewStatus::Pending {
                        return Err(ServiceError::StateConflict(format!(
                            "adjustment request {} is already {}, expected pending",
                            id, request.status
                        )));
                    }

                    journal::record_movement(
                        txn,
                        request.product_id,
                        request.location_id,
                        MovementType::AdjustmentRejected,
                        0,
                        supervisor.as_deref(),
                    )
                    .await?;

                    let mut active: adjustment_request::ActiveModel = request.into();
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
            .send(Event::AdjustmentRejected(rejected.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(rejected)
    }

    pub async fn get_adjustment(
        &self,
        id: Uuid,
    ) -> Result<adjustment_request::Model, ServiceError> {
        AdjustmentRequest::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("adjustment request {}", id)))
    }

    /// Lists adjustment requests, newest first. Unknown SKU or location
    /// filters simply match nothing.
    pub async fn list_adjustments(
        &self,
        filter: AdjustmentFilter,
    ) -> Result<Vec<adjustment_request::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let mut query = AdjustmentRequest::find();

        if let Some(status) = &filter.status {
            let status = ReviewStatus::parse(status).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown status filter {}", status))
            })?;
            query = query.filter(adjustment_request::Column::Status.eq(status.as_str()));
        }
        if let Some(sku) = &filter.sku {
            let product_id = product::Entity::find()
                .filter(product::Column::Sku.eq(sku))
                .one(db)
                .await
                .map_err(ServiceError::db_error)?
                .map(|p| p.id)
                .unwrap_or_else(Uuid::nil);
            query = query.filter(adjustment_request::Column::ProductId.eq(product_id));
        }
        if let Some(code) = &filter.location_code {
            let location_id = location::Entity::find()
                .filter(location::Column::Code.eq(code))
                .one(db)
                .await
                .map_err(ServiceError::db_error)?
                .map(|l| l.id)
                .unwrap_or_else(Uuid::nil);
            query = query.filter(adjustment_request::Column::LocationId.eq(location_id));
        }

        query
            .order_by_desc(adjustment_request::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(db)
            .await
            .map_err(ServiceError::db_error)
    }
}
