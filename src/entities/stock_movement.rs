use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type tags for journal entries. Stored as strings in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    Ingress,
    OrderDispatch,
    TransferEgress,
    TransferIngress,
    TransferRejected,
    AdjustmentApproved,
    AdjustmentRejected,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Ingress => "ingress",
            MovementType::OrderDispatch => "order-dispatch",
            MovementType::TransferEgress => "transfer-egress",
            MovementType::TransferIngress => "transfer-ingress",
            MovementType::TransferRejected => "transfer-rejected",
            MovementType::AdjustmentApproved => "adjustment-approved",
            MovementType::AdjustmentRejected => "adjustment-rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ingress" => Some(MovementType::Ingress),
            "order-dispatch" => Some(MovementType::OrderDispatch),
            "transfer-egress" => Some(MovementType::TransferEgress),
            "transfer-ingress" => Some(MovementType::TransferIngress),
            "transfer-rejected" => Some(MovementType::TransferRejected),
            "adjustment-approved" => Some(MovementType::AdjustmentApproved),
            "adjustment-rejected" => Some(MovementType::AdjustmentRejected),
            _ => None,
        }
    }
}

/// Append-only journal of every stock-affecting event. Quantities are
/// magnitudes except for `adjustment-approved`, which records the signed
/// reconciliation delta. Never updated or deleted after insert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub location_id: Uuid,
    /// Username of the operator; None means system-attributed.
    pub actor: Option<String>,
    pub movement_type: String,
    pub quantity: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
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
