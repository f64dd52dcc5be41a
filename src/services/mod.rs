// Core mutation services
pub mod adjustments;
pub mod ingress;
pub mod orders;
pub mod transfers;

// Catalog and read-side services
pub mod audit_log;
pub mod catalog;

// Shared domain helpers
pub mod blueprints;
pub mod capacity;
pub mod journal;
pub mod lookup;
