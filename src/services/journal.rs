use crate::{
    entities::{
        stock_audit::{self, MovementDirection},
        stock_movement::{self, MovementType},
    },
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;

/// Appends a journal entry for a stock-affecting event. `quantity` is the
/// signed delta for adjustment approvals and a magnitude everywhere else.
pub async fn record_movement<C: ConnectionTrait>(
    txn: &C,
    product_id: Uuid,
    location_id: Uuid,
    movement_type: MovementType,
    quantity: i32,
    actor: Option<&str>,
) -> Result<stock_movement::Model, ServiceError> {
    let movement = stock_movement::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        location_id: Set(location_id),
        actor: Set(actor.map(|a| a.to_string())),
        movement_type: Set(movement_type.as_str().to_string()),
        quantity: Set(quantity),
        created_at: Set(Utc::now()),
    };

    movement.insert(txn).await.map_err(ServiceError::db_error)
}

/// Appends an audit record with the before/after stock snapshot.
#[allow(clippy::too_many_arguments)]
pub async fn record_audit<C: ConnectionTrait>(
    txn: &C,
    product_id: Uuid,
    location_id: Uuid,
    direction: MovementDirection,
    quantity: i32,
    previous_stock: i32,
    new_stock: i32,
    observations: &str,
    actor: Option<&str>,
) -> Result<stock_audit::Model, ServiceError> {
    let audit = stock_audit::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        location_id: Set(location_id),
        actor: Set(actor.map(|a| a.to_string())),
        direction: Set(direction.as_str().to_string()),
        quantity: Set(quantity),
        previous_stock: Set(previous_stock),
        new_stock: Set(new_stock),
        observations: Set(observations.to_string()),
        created_at: Set(Utc::now()),
    };

    audit.insert(txn).await.map_err(ServiceError::db_error)
}
