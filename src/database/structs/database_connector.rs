use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::structs::database_connector_mysql::DatabaseConnectorMySQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;

/// Backend-neutral entry point. Constructed once at startup; clones share
/// the same pool and connection accounting.
#[derive(Debug, Clone)]
pub struct DatabaseConnector {
    pub(crate) mysql: Option<DatabaseConnectorMySQL>,
    pub(crate) sqlite: Option<DatabaseConnectorSQLite>,
    pub(crate) engine: DatabaseDrivers,
    pub(crate) log_queries: bool,
}
