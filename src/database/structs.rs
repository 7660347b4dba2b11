//! Database connector structures.

/// Networked connection parameters.
pub mod connection_params;

/// Accounting of connections held by in-flight operations.
pub mod connection_tracker;

/// Main database connector providing unified interface.
pub mod database_connector;

/// MySQL/MariaDB-specific database connector implementation.
pub mod database_connector_mysql;

/// SQLite-specific database connector implementation.
pub mod database_connector_sqlite;
