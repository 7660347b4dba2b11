use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::database_error::DatabaseError;
use crate::database::types::DatabaseRow;
use async_trait::async_trait;
use serde_json::Value;

/// One engine's execution and row conversion. The SQL handed in is already
/// normalized for [`DatabaseBackend::engine`]; every call acquires and
/// releases its own connection.
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    fn engine(&self) -> DatabaseDrivers;

    async fn fetch_rows(
        &self,
        sql: &str,
        params: &[Value],
        single: bool,
    ) -> Result<Vec<DatabaseRow>, DatabaseError>;

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DatabaseError>;

    async fn evolve_schema(&self) -> Result<(), DatabaseError>;

    fn active_connections(&self) -> usize;
}
