use crate::{
    entities::{location, stock},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

/// Projected occupancy of a location after an incoming quantity lands.
pub fn project(others_total: i64, incoming: i64, safety_margin: i64) -> i64 {
    others_total + incoming + safety_margin
}

/// Checks a projected stock total against a location's configured capacity.
/// Capacity 0 means the location is unconstrained.
pub fn check_capacity(
    location: &location::Model,
    others_total: i64,
    incoming: i64,
    safety_margin: i64,
) -> Result<(), ServiceError> {
    if location.capacity <= 0 {
        return Ok(());
    }

    let projected = project(others_total, incoming, safety_margin);
    if projected > location.capacity as i64 {
        return Err(ServiceError::CapacityExceeded(format!(
            "location {} capacity {} exceeded: projected total {}",
            location.code, location.capacity, projected
        )));
    }

    Ok(())
}

/// Sums the stock held at a location, optionally excluding one stock row.
/// Rows are locked so the total cannot shift under the caller's transaction.
pub async fn location_total_stock<C: ConnectionTrait>(
    txn: &C,
    location_id: Uuid,
    exclude_stock_id: Option<Uuid>,
) -> Result<i64, ServiceError> {
    let mut query = stock::Entity::find().filter(stock::Column::LocationId.eq(location_id));
    if let Some(excluded) = exclude_stock_id {
        query = query.filter(stock::Column::Id.ne(excluded));
    }

    let rows = query
        .lock_exclusive()
        .all(txn)
        .await
        .map_err(ServiceError::db_error)?;

    Ok(rows.iter().map(|row| row.quantity as i64).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn location_with_capacity(capacity: i32) -> location::Model {
        location::Model {
            id: Uuid::new_v4(),
            code: "LOC-A".into(),
            description: String::new(),
            capacity,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn zero_capacity_is_unconstrained() {
        let loc = location_with_capacity(0);
        assert!(check_capacity(&loc, 1_000_000, 1_000_000, 0).is_ok());
    }

    #[test]
    fn projection_within_capacity_passes() {
        let loc = location_with_capacity(100);
        assert!(check_capacity(&loc, 60, 40, 0).is_ok());
    }

    #[test]
    fn projection_over_capacity_fails() {
        let loc = location_with_capacity(100);
        let err = check_capacity(&loc, 60, 41, 0).unwrap_err();
        assert!(matches!(err, ServiceError::CapacityExceeded(_)));
    }

    #[test]
    fn safety_margin_counts_toward_projection() {
        let loc = location_with_capacity(100);
        assert!(check_capacity(&loc, 60, 30, 10).is_ok());
        assert!(check_capacity(&loc, 60, 30, 11).is_err());
    }
}
