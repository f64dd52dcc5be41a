use crate::{
    entities::{location, product, stock},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

pub async fn find_product_by_sku<C: ConnectionTrait>(
    conn: &C,
    sku: &str,
) -> Result<product::Model, ServiceError> {
    product::Entity::find()
        .filter(product::Column::Sku.eq(sku))
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::NotFound(format!("product with SKU {}", sku)))
}

pub async fn find_location_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<location::Model, ServiceError> {
    location::Entity::find()
        .filter(location::Column::Code.eq(code))
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::NotFound(format!("location with code {}", code)))
}

/// Locks and returns the stock row for a (product, location) pair, if present.
/// Quantity decisions must use the row this returns, never an earlier read.
pub async fn lock_stock_row<C: ConnectionTrait>(
    txn: &C,
    product_id: Uuid,
    location_id: Uuid,
) -> Result<Option<stock::Model>, ServiceError> {
    stock::Entity::find()
        .filter(stock::Column::ProductId.eq(product_id))
        .filter(stock::Column::LocationId.eq(location_id))
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(ServiceError::db_error)
}
