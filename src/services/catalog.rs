use crate::{
    db::DbPool,
    entities::{
        adjustment_request, internal_transfer, location,
        product::{self, ProductCategory},
        stock, stock_movement,
    },
    errors::ServiceError,
    services::{blueprints, lookup},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub reorder_point: Option<i32>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub reorder_point: Option<i32>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationInput {
    pub code: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocationInput {
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFilter {
    pub sku: Option<String>,
    pub location_code: Option<String>,
    pub limit: Option<u64>,
}

pub struct CatalogService {
    db_pool: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Catalogs a new product. Category blueprints supply the default
    /// description and raise the reorder point to the category floor.
    #[instrument(skip(self), fields(sku = %input.sku))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        if input.sku.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "product SKU is required".to_string(),
            ));
        }
        if input.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "product name is required".to_string(),
            ));
        }
        let category = match &input.category {
            Some(raw) => ProductCategory::parse(raw).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown product category {}", raw))
            })?,
            None => ProductCategory::Standard,
        };
        if let Some(rp) = input.reorder_point {
            if rp < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "reorder point must be non-negative, got {}",
                    rp
                )));
            }
        }

        let db = self.db_pool.as_ref();
        let existing = product::Entity::find()
            .filter(product::Column::Sku.eq(&input.sku))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "product with SKU {} already exists",
                input.sku
            )));
        }

        let description = match input.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => blueprints::default_description(category).to_string(),
        };
        let reorder_point =
            blueprints::recommended_reorder_point(category, input.reorder_point.unwrap_or(0));

        let created = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            sku: Set(input.sku),
            name: Set(input.name),
            description: Set(description),
            reorder_point: Set(reorder_point),
            category: Set(category.as_str().to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        info!("Product {} cataloged", created.sku);
        Ok(created)
    }

    /// Updates a product's mutable fields. The SKU is its identity and never
    /// changes.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        sku: &str,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        if let Some(rp) = input.reorder_point {
            if rp < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "reorder point must be non-negative, got {}",
                    rp
                )));
            }
        }
        let category = match &input.category {
            Some(raw) => Some(ProductCategory::parse(raw).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown product category {}", raw))
            })?),
            None => None,
        };

        let db = self.db_pool.as_ref();
        let existing = lookup::find_product_by_sku(db, sku).await?;

        let mut active: product::ActiveModel = existing.into();
        if let Some(v) = input.name {
            active.name = Set(v);
        }
        if let Some(v) = input.description {
            active.description = Set(v);
        }
        if let Some(v) = input.reorder_point {
            active.reorder_point = Set(v);
        }
        if let Some(c) = category {
            active.category = Set(c.as_str().to_string());
        }

        active.update(db).await.map_err(ServiceError::db_error)
    }

    /// Removes a product from the catalog, refused while any stock, journal,
    /// or adjustment row still references it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, sku: &str) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        let existing = lookup::find_product_by_sku(db, sku).await?;

        let stock_refs = stock::Entity::find()
            .filter(stock::Column::ProductId.eq(existing.id))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;
        let movement_refs = stock_movement::Entity::find()
            .filter(stock_movement::Column::ProductId.eq(existing.id))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;
        let adjustment_refs = adjustment_request::Entity::find()
            .filter(adjustment_request::Column::ProductId.eq(existing.id))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        if stock_refs + movement_refs + adjustment_refs > 0 {
            return Err(ServiceError::Conflict(format!(
                "product {} is referenced by stock or history rows and cannot be deleted",
                sku
            )));
        }

        existing.delete(db).await.map_err(ServiceError::db_error)?;
        Ok(())
    }

    pub async fn get_product(&self, sku: &str) -> Result<product::Model, ServiceError> {
        lookup::find_product_by_sku(self.db_pool.as_ref(), sku).await
    }

    pub async fn list_products(&self, limit: Option<u64>) -> Result<Vec<product::Model>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Sku)
            .limit(limit.unwrap_or(100).min(500))
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self), fields(code = %input.code))]
    pub async fn create_location(
        &self,
        input: CreateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        if input.code.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "location code is required".to_string(),
            ));
        }
        if let Some(capacity) = input.capacity {
            if capacity < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "capacity must be non-negative, got {}",
                    capacity
                )));
            }
        }

        let db = self.db_pool.as_ref();
        let existing = location::Entity::find()
            .filter(location::Column::Code.eq(&input.code))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "location with code {} already exists",
                input.code
            )));
        }

        let created = location::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            description: Set(input.description.unwrap_or_default()),
            capacity: Set(input.capacity.unwrap_or(0)),
            is_active: Set(input.is_active.unwrap_or(true)),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        info!("Location {} created", created.code);
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_location(
        &self,
        code: &str,
        input: UpdateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        if let Some(capacity) = input.capacity {
            if capacity < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "capacity must be non-negative, got {}",
                    capacity
                )));
            }
        }

        let db = self.db_pool.as_ref();
        let existing = lookup::find_location_by_code(db, code).await?;

        let mut active: location::ActiveModel = existing.into();
        if let Some(v) = input.description {
            active.description = Set(v);
        }
        if let Some(v) = input.capacity {
            active.capacity = Set(v);
        }
        if let Some(v) = input.is_active {
            active.is_active = Set(v);
        }

        active.update(db).await.map_err(ServiceError::db_error)
    }

    /// Removes a location, refused while stock or transfer rows reference it.
    #[instrument(skip(self))]
    pub async fn delete_location(&self, code: &str) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        let existing = lookup::find_location_by_code(db, code).await?;

        let stock_refs = stock::Entity::find()
            .filter(stock::Column::LocationId.eq(existing.id))
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;
        let transfer_refs = internal_transfer::Entity::find()
            .filter(
                internal_transfer::Column::OriginLocationId
                    .eq(existing.id)
                    .or(internal_transfer::Column::DestinationLocationId.eq(existing.id)),
            )
            .count(db)
            .await
            .map_err(ServiceError::db_error)?;

        if stock_refs + transfer_refs > 0 {
            return Err(ServiceError::Conflict(format!(
                "location {} is referenced by stock or transfer rows and cannot be deleted",
                code
            )));
        }

        existing.delete(db).await.map_err(ServiceError::db_error)?;
        Ok(())
    }

    pub async fn get_location(&self, code: &str) -> Result<location::Model, ServiceError> {
        lookup::find_location_by_code(self.db_pool.as_ref(), code).await
    }

    pub async fn list_locations(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<location::Model>, ServiceError> {
        location::Entity::find()
            .order_by_asc(location::Column::Code)
            .limit(limit.unwrap_or(100).min(500))
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Current stock levels, optionally narrowed to one product or location.
    pub async fn stock_levels(&self, filter: StockFilter) -> Result<Vec<stock::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let mut query = stock::Entity::find();

        if let Some(sku) = &filter.sku {
            let product = lookup::find_product_by_sku(db, sku).await?;
            query = query.filter(stock::Column::ProductId.eq(product.id));
        }
        if let Some(code) = &filter.location_code {
            let location = lookup::find_location_by_code(db, code).await?;
            query = query.filter(stock::Column::LocationId.eq(location.id));
        }

        query
            .order_by_desc(stock::Column::UpdatedAt)
            .limit(filter.limit.unwrap_or(100).min(500))
            .all(db)
            .await
            .map_err(ServiceError::db_error)
    }
}
