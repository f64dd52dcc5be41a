use crate::errors::ServiceError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle states. Transitions are strictly forward
/// (created → reserved → dispatched → closed); the only backward edge is
/// reserved → created, taken when a reserved order is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Reserved,
    Dispatched,
    Closed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Reserved => "reserved",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(OrderStatus::Created),
            "reserved" => Some(OrderStatus::Reserved),
            "dispatched" => Some(OrderStatus::Dispatched),
            "closed" => Some(OrderStatus::Closed),
            _ => None,
        }
    }

    /// Whether `target` is a legal next state from `self`.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Created, OrderStatus::Reserved)
                | (OrderStatus::Reserved, OrderStatus::Dispatched)
                | (OrderStatus::Reserved, OrderStatus::Created)
                | (OrderStatus::Dispatched, OrderStatus::Closed)
        )
    }

    /// Orders still open for item edits or deletion.
    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Created | OrderStatus::Reserved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "transfer" => Some(PaymentMethod::Transfer),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seller: Option<String>,
    pub status: String,
    pub customer_name: String,
    pub customer_address: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub payment_method: String,
    pub departure_time: Option<chrono::DateTime<chrono::Utc>>,
    pub estimated_arrival_time: Option<chrono::DateTime<chrono::Utc>>,
    pub actual_arrival_time: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Model {
    /// Parses the persisted status. An unrecognized value is surfaced as an
    /// error rather than defaulted, so a corrupted row cannot slip back into
    /// the editable path.
    pub fn status(&self) -> Result<OrderStatus, ServiceError> {
        OrderStatus::parse(&self.status).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "order {} has unrecognized status {:?}",
                self.id, self.status
            ))
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
    #[sea_orm(has_one = "super::delivery_alert::Entity")]
    DeliveryAlert,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl Related<super::delivery_alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryAlert.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row_with_status(status: &str) -> Model {
        Model {
            id: Uuid::new_v4(),
            seller: None,
            status: status.to_string(),
            customer_name: "Jordan Tester".to_string(),
            customer_address: "1 Dock Road".to_string(),
            contact_name: "Jordan".to_string(),
            contact_phone: "555-0100".to_string(),
            payment_method: "cash".to_string(),
            departure_time: None,
            estimated_arrival_time: None,
            actual_arrival_time: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn persisted_status_parses() {
        assert_eq!(
            row_with_status("reserved").status().unwrap(),
            OrderStatus::Reserved
        );
    }

    #[test]
    fn mangled_status_is_an_error_not_a_default() {
        assert_matches!(
            row_with_status("shipped").status(),
            Err(ServiceError::InternalError(_))
        );
    }
}
