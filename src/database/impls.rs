pub mod connection_params;
pub mod connection_tracker;
pub mod database_connector;
pub mod database_connector_mysql;
pub mod database_connector_sqlite;
pub mod database_drivers;
pub mod database_error;
pub mod query_result;
