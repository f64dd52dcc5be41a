pub mod adjustment_request;
pub mod delivery_alert;
pub mod internal_transfer;
pub mod location;
pub mod order;
pub mod order_item;
pub mod product;
pub mod stock;
pub mod stock_audit;
pub mod stock_movement;
