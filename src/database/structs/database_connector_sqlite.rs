use crate::database::structs::connection_tracker::ConnectionTracker;
use sqlx::sqlite::SqliteConnectOptions;

/// Embedded backend: a fresh handle on the store file per operation.
#[derive(Debug, Clone)]
pub struct DatabaseConnectorSQLite {
    pub(crate) options: SqliteConnectOptions,
    pub(crate) tracker: ConnectionTracker,
}
