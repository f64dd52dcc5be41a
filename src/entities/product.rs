use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product categories understood by the catalog blueprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Standard,
    Perishable,
    Fragile,
    Bulk,
    Hazardous,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Standard => "standard",
            ProductCategory::Perishable => "perishable",
            ProductCategory::Fragile => "fragile",
            ProductCategory::Bulk => "bulk",
            ProductCategory::Hazardous => "hazardous",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(ProductCategory::Standard),
            "perishable" => Some(ProductCategory::Perishable),
            "fragile" => Some(ProductCategory::Fragile),
            "bulk" => Some(ProductCategory::Bulk),
            "hazardous" => Some(ProductCategory::Hazardous),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    pub description: String,
    pub reorder_point: i32,
    pub category: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    pub fn category(&self) -> ProductCategory {
        ProductCategory::parse(&self.category).unwrap_or(ProductCategory::Standard)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
