pub mod connection;
pub mod organization_order;
