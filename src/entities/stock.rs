use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (product, location) pair: the single source of truth for how
/// much of a product sits at a location. Rows are created lazily on first
/// ingress or transfer-in and never deleted, so the pair's history stays
/// queryable even at quantity zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub location_id: Uuid,
    pub quantity: i32,
    /// Per-pair override of the product's reorder point.
    pub custom_reorder_point: Option<i32>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    /// Effective reorder threshold: pair override, else the product default.
    pub fn effective_reorder_point(&self, product: &super::product::Model) -> i32 {
        self.custom_reorder_point.unwrap_or(product.reorder_point)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
