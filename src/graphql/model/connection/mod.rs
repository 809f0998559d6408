pub mod organization_connection;
