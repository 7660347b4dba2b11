use crate::config::structs::configuration::Configuration;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::database_error::DatabaseError;
use crate::database::enums::query_result::QueryResult;
use crate::database::helpers::normalize_sql;
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_mysql::DatabaseConnectorMySQL;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::database::traits::database_backend::DatabaseBackend;
use crate::database::types::DatabaseRow;
use log::{debug, error, warn};
use serde_json::Value;
use std::sync::Arc;

impl DatabaseConnector {
    /// Resolves the backend once. A configured host means MySQL; if the pool
    /// or the schema probe fails the connector falls back to the SQLite file.
    /// Only a SQLite failure is returned as an error.
    pub async fn new(config: Arc<Configuration>) -> Result<DatabaseConnector, DatabaseError> {
        let database = &config.database;
        if let Some(params) = database.connection_params() {
            match DatabaseConnectorMySQL::database_connector(&params, database).await {
                Ok(connector) => return Ok(connector),
                Err(error) => {
                    error!("[MySQL] Unable to use MySQL on {}", params.redacted());
                    error!("[MySQL] Message: {}", error);
                    warn!("[BOOT] Falling back to SQLite store {}", database.sqlite_path);
                }
            }
        }
        DatabaseConnectorSQLite::database_connector(&database.sqlite_path, database.log_queries).await
    }

    pub fn engine(&self) -> DatabaseDrivers {
        self.engine
    }

    pub fn backend(&self) -> Result<&dyn DatabaseBackend, DatabaseError> {
        match self.engine {
            DatabaseDrivers::sqlite3 => self
                .sqlite
                .as_ref()
                .map(|sqlite| sqlite as &dyn DatabaseBackend)
                .ok_or(DatabaseError::NotConnected),
            DatabaseDrivers::mysql => self
                .mysql
                .as_ref()
                .map(|mysql| mysql as &dyn DatabaseBackend)
                .ok_or(DatabaseError::NotConnected),
        }
    }

    /// Connections currently held by in-flight calls. Zero whenever the
    /// connector is idle.
    pub fn active_connections(&self) -> usize {
        self.backend().map(|backend| backend.active_connections()).unwrap_or(0)
    }

    pub fn set_log_queries(&mut self, log_queries: bool) {
        self.log_queries = log_queries;
    }

    /// Reads with the first row (`single`) or every row. No match is not an
    /// error: `Single(None)` or an empty `Multiple`.
    pub async fn db_read(&self, sql: &str, params: &[Value], single: bool) -> Result<QueryResult, DatabaseError> {
        let backend = self.backend()?;
        let statement = normalize_sql(self.engine, sql);
        match backend.fetch_rows(&statement, params, single).await {
            Ok(rows) => {
                let result = QueryResult::from_rows(rows, single);
                if self.log_queries {
                    debug!("[DB] db_read(single={}) {} {:?} -> {:?}", single, statement, params, result);
                }
                Ok(result)
            }
            Err(error) => {
                if self.log_queries {
                    debug!("[DB] db_read(single={}) {} {:?} failed: {}", single, statement, params, error);
                }
                Err(error)
            }
        }
    }

    pub async fn fetch_one(&self, sql: &str, params: &[Value]) -> Result<Option<DatabaseRow>, DatabaseError> {
        Ok(self.db_read(sql, params, true).await?.into_single())
    }

    pub async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<DatabaseRow>, DatabaseError> {
        Ok(self.db_read(sql, params, false).await?.into_rows())
    }

    /// Runs one statement in its own transaction and commits it. Errors are
    /// returned after the connection has been released; nothing is retried.
    pub async fn db_write(&self, sql: &str, params: &[Value]) -> Result<u64, DatabaseError> {
        let backend = self.backend()?;
        let statement = normalize_sql(self.engine, sql);
        match backend.execute(&statement, params).await {
            Ok(affected) => {
                if self.log_queries {
                    debug!("[DB] db_write OK: {} {:?} ({} rows)", statement, params, affected);
                }
                Ok(affected)
            }
            Err(error) => {
                if self.log_queries {
                    debug!("[DB] db_write {} {:?} failed: {}", statement, params, error);
                }
                Err(error)
            }
        }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.fetch_one("SELECT 1 AS ping", &[]).await.map(|_| ())
    }

    /// Full schema pass for the active backend: table creation plus column
    /// additions on SQLite, column additions only on MySQL.
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        match self.engine {
            DatabaseDrivers::sqlite3 => match &self.sqlite {
                Some(sqlite) => sqlite.ensure_schema().await,
                None => Err(DatabaseError::NotConnected),
            },
            DatabaseDrivers::mysql => self.backend()?.evolve_schema().await,
        }
    }
}
