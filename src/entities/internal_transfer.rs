use crate::errors::ServiceError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use super::adjustment_request::ReviewStatus;

/// A proposal to relocate stock between two different locations. Becomes a
/// paired egress/ingress mutation only upon approval.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "internal_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub origin_location_id: Uuid,
    pub destination_location_id: Uuid,
    pub quantity: i32,
    pub reason: String,
    /// Seed for the destination stock row's reorder override; only applied
    /// when that row does not exist yet at approval time.
    pub destination_reorder_point: Option<i32>,
    pub status: String,
    pub created_by: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub processed_by: Option<String>,
    pub processed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub resolution_comment: Option<String>,
}

impl Model {
    /// Parses the persisted status; an unrecognized value is an error, never
    /// treated as still pending.
    pub fn status(&self) -> Result<ReviewStatus, ServiceError> {
        ReviewStatus::parse(&self.status).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "transfer {} has unrecognized status {:?}",
                self.id, self.status
            ))
        })
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
        from = "Column::OriginLocationId",
        to = "super::location::Column::Id"
    )]
    OriginLocation,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::DestinationLocationId",
        to = "super::location::Column::Id"
    )]
    DestinationLocation,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
