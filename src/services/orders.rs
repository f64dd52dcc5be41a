use crate::{
    db::DbPool,
    entities::{
        delivery_alert,
        order::{self, Entity as Order, OrderStatus, PaymentMethod},
        order_item, stock,
        stock_audit::MovementDirection,
        stock_movement::MovementType,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::{journal, lookup},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub sku: String,
    pub quantity: i32,
    pub location_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub seller: Option<String>,
    pub customer_name: String,
    pub customer_address: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub payment_method: Option<String>,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderInput {
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub payment_method: Option<String>,
    pub estimated_arrival_time: Option<DateTime<Utc>>,
    /// Clears the ETA when true; `estimated_arrival_time` wins if both are set.
    #[serde(default)]
    pub clear_estimated_arrival: bool,
    /// Full replacement of the item list when present.
    pub items: Option<Vec<OrderItemInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub seller: Option<String>,
    pub limit: Option<u64>,
}

/// An order plus its owned rows, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
    pub delivery_alert: Option<delivery_alert::Model>,
}

/// Outcome of an order edit. `reservation_warning` is set when the automatic
/// re-reservation of a previously reserved order failed; the edit itself
/// still succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdateOutcome {
    pub order: order::Model,
    pub reservation_warning: Option<String>,
}

pub struct OrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_order(
        &self,
        input: CreateOrderInput,
    ) -> Result<OrderDetails, ServiceError> {
        let payment_method = match &input.payment_method {
            Some(raw) => PaymentMethod::parse(raw).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown payment method {}", raw))
            })?,
            None => PaymentMethod::Cash,
        };
        if input.customer_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "customer name is required".to_string(),
            ));
        }
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(ServiceError::ValidationError(format!(
                    "item quantity must be positive, got {} for SKU {}",
                    item.quantity, item.sku
                )));
            }
        }

        let db = self.db_pool.as_ref();
        let details = db
            .transaction::<_, OrderDetails, ServiceError>(move |txn| {
                Box::pin(async move {
                    let created = order::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        seller: Set(input.seller),
                        status: Set(OrderStatus::Created.as_str().to_string()),
                        customer_name: Set(input.customer_name),
                        customer_address: Set(input.customer_address),
                        contact_name: Set(input.contact_name),
                        contact_phone: Set(input.contact_phone),
                        payment_method: Set(payment_method.as_str().to_string()),
                        departure_time: Set(None),
                        estimated_arrival_time: Set(input.estimated_arrival_time),
                        actual_arrival_time: Set(None),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::db_error)?;

                    let items = insert_items(txn, created.id, &input.items).await?;

                    Ok(OrderDetails {
                        order: created,
                        items,
                        delivery_alert: None,
                    })
                })
            })
            .await
            .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderCreated(details.order.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(details)
    }

    /// Edits an order still open for changes. The item list, when present, is
    /// fully replaced and the order drops back to `created`; if it had been
    /// reserved, re-reservation is attempted and a warning reported on failure.
    #[instrument(skip(self, input))]
    pub async fn update_order(
        &self,
        id: Uuid,
        input: UpdateOrderInput,
    ) -> Result<OrderUpdateOutcome, ServiceError> {
        if let Some(items) = &input.items {
            for item in items {
                if item.quantity <= 0 {
                    return Err(ServiceError::ValidationError(format!(
                        "item quantity must be positive, got {} for SKU {}",
                        item.quantity, item.sku
                    )));
                }
            }
        }
        if let Some(raw) = &input.payment_method {
            if PaymentMethod::parse(raw).is_none() {
                return Err(ServiceError::ValidationError(format!(
                    "unknown payment method {}",
                    raw
                )));
            }
        }

        let db = self.db_pool.as_ref();
        let (updated, was_reserved) = db
            .transaction::<_, (order::Model, bool), ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = Order::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

                    let status = existing.status()?;
                    if !status.is_editable() {
                        return Err(ServiceError::StateConflict(format!(
                            "order {} is {}, only created or reserved orders can be edited",
                            id, existing.status
                        )));
                    }
                    let was_reserved = status == OrderStatus::Reserved;

                    if let Some(items) = &input.items {
                        order_item::Entity::delete_many()
                            .filter(order_item::Column::OrderId.eq(id))
                            .exec(txn)
                            .await
                            .map_err(ServiceError::db_error)?;
                        insert_items(txn, id, items).await?;
                    }

                    let mut active: order::ActiveModel = existing.into();
                    if let Some(v) = input.customer_name {
                        active.customer_name = Set(v);
                    }
                    if let Some(v) = input.customer_address {
                        active.customer_address = Set(v);
                    }
                    if let Some(v) = input.contact_name {
                        active.contact_name = Set(v);
                    }
                    if let Some(v) = input.contact_phone {
                        active.contact_phone = Set(v);
                    }
                    if let Some(v) = input.payment_method {
                        active.payment_method = Set(v);
                    }
                    if let Some(eta) = input.estimated_arrival_time {
                        active.estimated_arrival_time = Set(Some(eta));
                    } else if input.clear_estimated_arrival {
                        active.estimated_arrival_time = Set(None);
                    }
                    active.status = Set(OrderStatus::Created.as_str().to_string());

                    let updated = active.update(txn).await.map_err(ServiceError::db_error)?;
                    Ok((updated, was_reserved))
                })
            })
            .await
            .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderUpdated(updated.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        let mut outcome = OrderUpdateOutcome {
            order: updated,
            reservation_warning: None,
        };

        if was_reserved {
            match self.reserve_order(id, None).await {
                Ok(details) => outcome.order = details.order,
                Err(e) => {
                    warn!(order_id = %id, error = %e, "Automatic re-reservation failed after edit");
                    outcome.reservation_warning =
                        Some(format!("order edited but re-reservation failed: {}", e));
                }
            }
        }

        Ok(outcome)
    }

    /// Deletes an order that has not yet shipped, along with its items and
    /// any delivery alert.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                let existing = Order::find_by_id(id)
                    .lock_exclusive()
                    .one(txn)
                    .await
                    .map_err(ServiceError::db_error)?
                    .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

                if !existing.status()?.is_editable() {
                    return Err(ServiceError::StateConflict(format!(
                        "order {} is {}, dispatched or closed orders cannot be deleted",
                        id, existing.status
                    )));
                }

                order_item::Entity::delete_many()
                    .filter(order_item::Column::OrderId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::db_error)?;
                delivery_alert::Entity::delete_many()
                    .filter(delivery_alert::Column::OrderId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::db_error)?;
                existing.delete(txn).await.map_err(ServiceError::db_error)?;
                Ok(())
            })
        })
        .await
        .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderDeleted(id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(())
    }

    /// Checks availability for every item under lock without decrementing
    /// anything, then marks the order reserved. All-or-nothing: one short
    /// item aborts the whole reservation.
    #[instrument(skip(self))]
    pub async fn reserve_order(
        &self,
        id: Uuid,
        operator: Option<String>,
    ) -> Result<OrderDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let details = db
            .transaction::<_, OrderDetails, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = Order::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

                    let status = existing.status()?;
                    if status != OrderStatus::Created && status != OrderStatus::Reserved {
                        return Err(ServiceError::StateConflict(format!(
                            "order {} is {}, expected created or reserved",
                            id, existing.status
                        )));
                    }

                    let items = load_items_locked(txn, id).await?;
                    if items.is_empty() {
                        return Err(ServiceError::ValidationError(format!(
                            "order {} has no items to reserve",
                            id
                        )));
                    }

                    for item in &items {
                        let location_id = item.location_id.ok_or_else(|| {
                            ServiceError::ValidationError(format!(
                                "order item {} has no assigned location",
                                item.id
                            ))
                        })?;

                        let row = lookup::lock_stock_row(txn, item.product_id, location_id)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InsufficientStock(format!(
                                    "no stock for product {} at location {}",
                                    item.product_id, location_id
                                ))
                            })?;

                        if row.quantity < item.quantity {
                            return Err(ServiceError::InsufficientStock(format!(
                                "location {} holds {} units of product {}, order needs {}",
                                location_id, row.quantity, item.product_id, item.quantity
                            )));
                        }
                    }

                    let mut reserved_items = Vec::with_capacity(items.len());
                    for item in items {
                        let mut active: order_item::ActiveModel = item.into();
                        active.reserved = Set(true);
                        reserved_items
                            .push(active.update(txn).await.map_err(ServiceError::db_error)?);
                    }

                    let mut active_order: order::ActiveModel = existing.into();
                    active_order.status = Set(OrderStatus::Reserved.as_str().to_string());
                    let updated = active_order
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    Ok(OrderDetails {
                        order: updated,
                        items: reserved_items,
                        delivery_alert: None,
                    })
                })
            })
            .await
            .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderReserved(details.order.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        Ok(details)
    }

    /// Ships a reserved order: every item's stock is locked, validated, and
    /// decremented, journal entries written, and the delivery alert synced to
    /// the ETA, all in one transaction.
    #[instrument(skip(self))]
    pub async fn dispatch_order(
        &self,
        id: Uuid,
        operator: Option<String>,
    ) -> Result<OrderDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let actor = operator.clone();
        let details = db
            .transaction::<_, OrderDetails, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = Order::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

                    if existing.status()? != OrderStatus::Reserved {
                        return Err(ServiceError::StateConflict(format!(
                            "order {} is {}, only reserved orders can be dispatched",
                            id, existing.status
                        )));
                    }

                    let items = load_items_locked(txn, id).await?;
                    if items.is_empty() {
                        return Err(ServiceError::ValidationError(format!(
                            "order {} has no items to dispatch",
                            id
                        )));
                    }

                    let mut dispatched_items = Vec::with_capacity(items.len());
                    for item in items {
                        let location_id = item.location_id.ok_or_else(|| {
                            ServiceError::ValidationError(format!(
                                "order item {} has no assigned location",
                                item.id
                            ))
                        })?;

                        let row = lookup::lock_stock_row(txn, item.product_id, location_id)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::InsufficientStock(format!(
                                    "no stock for product {} at location {}",
                                    item.product_id, location_id
                                ))
                            })?;

                        if row.quantity < item.quantity {
                            return Err(ServiceError::InsufficientStock(format!(
                                "location {} holds {} units of product {}, order needs {}",
                                location_id, row.quantity, item.product_id, item.quantity
                            )));
                        }

                        let previous = row.quantity;
                        let mut active_stock: stock::ActiveModel = row.into();
                        active_stock.quantity = Set(previous - item.quantity);
                        active_stock.updated_at = Set(Utc::now());
                        let updated_stock = active_stock
                            .update(txn)
                            .await
                            .map_err(ServiceError::db_error)?;

                        journal::record_movement(
                            txn,
                            item.product_id,
                            location_id,
                            MovementType::OrderDispatch,
                            item.quantity,
                            actor.as_deref(),
                        )
                        .await?;
                        journal::record_audit(
                            txn,
                            item.product_id,
                            location_id,
                            MovementDirection::Egress,
                            item.quantity,
                            previous,
                            updated_stock.quantity,
                            &format!("dispatch of order {}", id),
                            actor.as_deref(),
                        )
                        .await?;

                        // Consumed now, no longer merely held.
                        let mut active_item: order_item::ActiveModel = item.into();
                        active_item.reserved = Set(false);
                        dispatched_items.push(
                            active_item
                                .update(txn)
                                .await
                                .map_err(ServiceError::db_error)?,
                        );
                    }

                    let eta = existing.estimated_arrival_time;
                    let mut active_order: order::ActiveModel = existing.into();
                    active_order.status = Set(OrderStatus::Dispatched.as_str().to_string());
                    active_order.departure_time = Set(Some(Utc::now()));
                    active_order.actual_arrival_time = Set(None);
                    let updated = active_order
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let alert = sync_delivery_alert(txn, &updated, eta).await?;

                    info!("Order {} dispatched", updated.id);

                    Ok(OrderDetails {
                        order: updated,
                        items: dispatched_items,
                        delivery_alert: alert,
                    })
                })
            })
            .await
            .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderDispatched {
                order_id: details.order.id,
                estimated_arrival_time: details.order.estimated_arrival_time,
            })
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        if let Some(alert) = &details.delivery_alert {
            if !alert.resolved {
                self.event_sender
                    .send(Event::DeliveryAlertRaised {
                        order_id: details.order.id,
                        due_time: alert.due_time,
                    })
                    .await
                    .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;
            }
        }

        Ok(details)
    }

    /// Completes a dispatched order: records the actual arrival and resolves
    /// the delivery alert. Stock already moved at dispatch.
    #[instrument(skip(self))]
    pub async fn close_order(
        &self,
        id: Uuid,
        operator: Option<String>,
    ) -> Result<OrderDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let details = db
            .transaction::<_, OrderDetails, ServiceError>(move |txn| {
                Box::pin(async move {
                    let existing = Order::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

                    if existing.status()? != OrderStatus::Dispatched {
                        return Err(ServiceError::StateConflict(format!(
                            "order {} is {}, only dispatched orders can be closed",
                            id, existing.status
                        )));
                    }

                    let mut active_order: order::ActiveModel = existing.into();
                    active_order.status = Set(OrderStatus::Closed.as_str().to_string());
                    active_order.actual_arrival_time = Set(Some(Utc::now()));
                    let updated = active_order
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let alert = resolve_delivery_alert(txn, updated.id).await?;
                    let items = load_items(txn, updated.id).await?;

                    info!("Order {} closed", updated.id);

                    Ok(OrderDetails {
                        order: updated,
                        items,
                        delivery_alert: alert,
                    })
                })
            })
            .await
            .map_err(map_txn_err)?;

        self.event_sender
            .send(Event::OrderClosed(details.order.id))
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;

        if details.delivery_alert.is_some() {
            self.event_sender
                .send(Event::DeliveryAlertResolved(details.order.id))
                .await
                .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))?;
        }

        Ok(details)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let order = Order::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

        let items = load_items(db, id).await?;
        let alert = delivery_alert::Entity::find()
            .filter(delivery_alert::Column::OrderId.eq(id))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(OrderDetails {
            order,
            items,
            delivery_alert: alert,
        })
    }

    pub async fn list_orders(
        &self,
        filter: OrderFilter,
    ) -> Result<Vec<order::Model>, ServiceError> {
        let mut query = Order::find();

        if let Some(status) = &filter.status {
            let status = OrderStatus::parse(status).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown status filter {}", status))
            })?;
            query = query.filter(order::Column::Status.eq(status.as_str()));
        }
        if let Some(seller) = &filter.seller {
            query = query.filter(order::Column::Seller.eq(seller));
        }

        query
            .order_by_desc(order::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }
}

fn map_txn_err(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}

async fn insert_items<C: ConnectionTrait>(
    txn: &C,
    order_id: Uuid,
    items: &[OrderItemInput],
) -> Result<Vec<order_item::Model>, ServiceError> {
    let mut inserted = Vec::with_capacity(items.len());
    for item in items {
        let product = lookup::find_product_by_sku(txn, &item.sku).await?;
        let location_id = match &item.location_code {
            Some(code) => Some(lookup::find_location_by_code(txn, code).await?.id),
            None => None,
        };

        inserted.push(
            order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(product.id),
                location_id: Set(location_id),
                quantity: Set(item.quantity),
                reserved: Set(false),
            }
            .insert(txn)
            .await
            .map_err(ServiceError::db_error)?,
        );
    }
    Ok(inserted)
}

async fn load_items<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
) -> Result<Vec<order_item::Model>, ServiceError> {
    order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(conn)
        .await
        .map_err(ServiceError::db_error)
}

/// Items in deterministic (product, location) order so concurrent multi-item
/// operations acquire stock locks in the same sequence.
async fn load_items_locked<C: ConnectionTrait>(
    txn: &C,
    order_id: Uuid,
) -> Result<Vec<order_item::Model>, ServiceError> {
    order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::ProductId)
        .order_by_asc(order_item::Column::LocationId)
        .all(txn)
        .await
        .map_err(ServiceError::db_error)
}

/// Creates or refreshes the order's delivery alert from its ETA; with no ETA,
/// any stale alert is marked resolved.
async fn sync_delivery_alert<C: ConnectionTrait>(
    txn: &C,
    order: &order::Model,
    eta: Option<DateTime<Utc>>,
) -> Result<Option<delivery_alert::Model>, ServiceError> {
    let existing = delivery_alert::Entity::find()
        .filter(delivery_alert::Column::OrderId.eq(order.id))
        .one(txn)
        .await
        .map_err(ServiceError::db_error)?;

    match (eta, existing) {
        (Some(due_time), Some(alert)) => {
            let mut active: delivery_alert::ActiveModel = alert.into();
            active.due_time = Set(due_time);
            active.resolved = Set(false);
            active.message = Set(format!("order {} due {}", order.id, due_time));
            Ok(Some(
                active.update(txn).await.map_err(ServiceError::db_error)?,
            ))
        }
        (Some(due_time), None) => Ok(Some(
            delivery_alert::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                due_time: Set(due_time),
                message: Set(format!("order {} due {}", order.id, due_time)),
                resolved: Set(false),
                created_at: Set(Utc::now()),
            }
            .insert(txn)
            .await
            .map_err(ServiceError::db_error)?,
        )),
        (None, Some(alert)) if !alert.resolved => {
            let mut active: delivery_alert::ActiveModel = alert.into();
            active.resolved = Set(true);
            Ok(Some(
                active.update(txn).await.map_err(ServiceError::db_error)?,
            ))
        }
        (None, other) => Ok(other),
    }
}

async fn resolve_delivery_alert<C: ConnectionTrait>(
    txn: &C,
    order_id: Uuid,
) -> Result<Option<delivery_alert::Model>, ServiceError> {
    let existing = delivery_alert::Entity::find()
        .filter(delivery_alert::Column::OrderId.eq(order_id))
        .one(txn)
        .await
        .map_err(ServiceError::db_error)?;

    match existing {
        Some(alert) if !alert.resolved => {
            let mut active: delivery_alert::ActiveModel = alert.into();
            active.resolved = Set(true);
            Ok(Some(
                active.update(txn).await.map_err(ServiceError::db_error)?,
            ))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::order::OrderStatus;

    #[test]
    fn lifecycle_is_strictly_forward() {
        assert!(OrderStatus::Created.can_transition_to(OrderStatus::Reserved));
        assert!(OrderStatus::Reserved.can_transition_to(OrderStatus::Dispatched));
        assert!(OrderStatus::Dispatched.can_transition_to(OrderStatus::Closed));

        assert!(!OrderStatus::Created.can_transition_to(OrderStatus::Dispatched));
        assert!(!OrderStatus::Closed.can_transition_to(OrderStatus::Created));
        assert!(!OrderStatus::Dispatched.can_transition_to(OrderStatus::Reserved));
    }

    #[test]
    fn edit_edge_goes_back_to_created_only_from_reserved() {
        assert!(OrderStatus::Reserved.can_transition_to(OrderStatus::Created));
        assert!(!OrderStatus::Dispatched.can_transition_to(OrderStatus::Created));
    }

    #[test]
    fn editability_matches_lifecycle() {
        assert!(OrderStatus::Created.is_editable());
        assert!(OrderStatus::Reserved.is_editable());
        assert!(!OrderStatus::Dispatched.is_editable());
        assert!(!OrderStatus::Closed.is_editable());
    }
}
