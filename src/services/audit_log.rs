use crate::{
    db::DbPool,
    entities::{
        location, product, stock_audit,
        stock_movement::{self, MovementType},
    },
    errors::ServiceError,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Read-only filters over the movement journal and audit trail. No invariants
/// of their own; history rows are immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub actor: Option<String>,
    pub sku: Option<String>,
    pub location_code: Option<String>,
    pub movement_type: Option<String>,
    pub limit: Option<u64>,
}

pub struct AuditLogService {
    db_pool: Arc<DbPool>,
}

impl AuditLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    async fn resolve_product_id(&self, sku: &str) -> Result<Uuid, ServiceError> {
        Ok(product::Entity::find()
            .filter(product::Column::Sku.eq(sku))
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .map(|p| p.id)
            .unwrap_or_else(Uuid::nil))
    }

    async fn resolve_location_id(&self, code: &str) -> Result<Uuid, ServiceError> {
        Ok(location::Entity::find()
            .filter(location::Column::Code.eq(code))
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .map(|l| l.id)
            .unwrap_or_else(Uuid::nil))
    }

    /// Journal entries matching the filter, newest first.
    pub async fn list_movements(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<stock_movement::Model>, ServiceError> {
        let mut query = stock_movement::Entity::find();

        if let Some(from) = filter.from {
            query = query.filter(stock_movement::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(stock_movement::Column::CreatedAt.lte(to));
        }
        if let Some(actor) = &filter.actor {
            query = query.filter(stock_movement::Column::Actor.eq(actor));
        }
        if let Some(raw) = &filter.movement_type {
            let movement_type = MovementType::parse(raw).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown movement type {}", raw))
            })?;
            query = query.filter(stock_movement::Column::MovementType.eq(movement_type.as_str()));
        }
        if let Some(sku) = &filter.sku {
            let product_id = self.resolve_product_id(sku).await?;
            query = query.filter(stock_movement::Column::ProductId.eq(product_id));
        }
        if let Some(code) = &filter.location_code {
            let location_id = self.resolve_location_id(code).await?;
            query = query.filter(stock_movement::Column::LocationId.eq(location_id));
        }

        query
            .order_by_desc(stock_movement::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Audit records matching the filter, newest first.
    pub async fn list_audits(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<stock_audit::Model>, ServiceError> {
        let mut query = stock_audit::Entity::find();

        if let Some(from) = filter.from {
            query = query.filter(stock_audit::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(stock_audit::Column::CreatedAt.lte(to));
        }
        if let Some(actor) = &filter.actor {
            query = query.filter(stock_audit::Column::Actor.eq(actor));
        }
        if let Some(sku) = &filter.sku {
            let product_id = self.resolve_product_id(sku).await?;
            query = query.filter(stock_audit::Column::ProductId.eq(product_id));
        }
        if let Some(code) = &filter.location_code {
            let location_id = self.resolve_location_id(code).await?;
            query = query.filter(stock_audit::Column::LocationId.eq(location_id));
        }

        query
            .order_by_desc(stock_audit::Column::CreatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }
}
