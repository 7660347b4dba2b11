use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::database_error::DatabaseError;
use crate::database::schema::{is_ignorable_schema_error, COLUMN_ADDITIONS, SQLITE_TABLES};
use crate::database::structs::connection_tracker::{ConnectionLease, ConnectionTracker};
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
use crate::database::traits::database_backend::DatabaseBackend;
use crate::database::types::{blob_value, DatabaseRow};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, Sqlite, SqliteConnection, TypeInfo, ValueRef};
use std::time::Duration;

const ENGINE: DatabaseDrivers = DatabaseDrivers::sqlite3;

impl DatabaseConnectorSQLite {
    pub fn connect_options(path: &str) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Debug, Duration::from_secs(1))
    }

    /// Builds the connector and brings the store's schema up to date. Any
    /// failure here is fatal; there is nothing left to fall back to.
    #[tracing::instrument(level = "debug")]
    pub async fn create(path: &str) -> Result<DatabaseConnectorSQLite, DatabaseError> {
        let connector = DatabaseConnectorSQLite {
            options: Self::connect_options(path),
            tracker: ConnectionTracker::new(),
        };
        connector.ensure_schema().await?;
        Ok(connector)
    }

    #[tracing::instrument(level = "debug")]
    pub async fn database_connector(path: &str, log_queries: bool) -> Result<DatabaseConnector, DatabaseError> {
        let sqlite = match DatabaseConnectorSQLite::create(path).await {
            Ok(sqlite) => sqlite,
            Err(error) => {
                error!("{} Unable to open SQLite store {}", ENGINE.log_prefix(), path);
                error!("{} Message: {}", ENGINE.log_prefix(), error);
                return Err(DatabaseError::Setup(format!("unable to open SQLite store {}: {}", path, error)));
            }
        };
        info!("[BOOT] Using SQLite store {}", path);
        Ok(DatabaseConnector {
            mysql: None,
            sqlite: Some(sqlite),
            engine: ENGINE,
            log_queries,
        })
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let (mut connection, lease) = self.open().await?;
        let result = Self::create_tables(&mut connection).await;
        self.release(connection, lease).await;
        result?;
        self.evolve_schema().await
    }

    async fn create_tables(connection: &mut SqliteConnection) -> Result<(), DatabaseError> {
        for (table, statement) in SQLITE_TABLES {
            debug!("{} Ensuring table {}", ENGINE.log_prefix(), table);
            sqlx::query(statement).execute(&mut *connection).await?;
        }
        Ok(())
    }

    async fn apply_column_additions(connection: &mut SqliteConnection) -> Result<(), DatabaseError> {
        for addition in COLUMN_ADDITIONS {
            let statement = addition.alter_statement(ENGINE);
            match sqlx::query(&statement).execute(&mut *connection).await {
                Ok(_) => {
                    info!("{} Added column {}.{}", ENGINE.log_prefix(), addition.table, addition.column);
                }
                Err(error) if is_ignorable_schema_error(ENGINE, &error) => {
                    debug!("{} Column {}.{} already present", ENGINE.log_prefix(), addition.table, addition.column);
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    async fn open(&self) -> Result<(SqliteConnection, ConnectionLease), DatabaseError> {
        let connection = self.options.connect().await?;
        Ok((connection, self.tracker.lease()))
    }

    async fn release(&self, connection: SqliteConnection, lease: ConnectionLease) {
        if let Err(error) = connection.close().await {
            warn!("{} Closing handle failed: {}", ENGINE.log_prefix(), error);
        }
        drop(lease);
    }

    async fn fetch_on(
        connection: &mut SqliteConnection,
        sql: &str,
        params: &[Value],
        single: bool,
    ) -> Result<Vec<DatabaseRow>, DatabaseError> {
        let query = bind_params(sql, params);
        if single {
            let row = query.fetch_optional(&mut *connection).await?;
            return Ok(row.iter().map(sqlite_row_to_map).collect());
        }
        let rows = query.fetch_all(&mut *connection).await?;
        Ok(rows.iter().map(sqlite_row_to_map).collect())
    }

    async fn execute_on(connection: &mut SqliteConnection, sql: &str, params: &[Value]) -> Result<u64, DatabaseError> {
        let mut transaction = connection.begin().await?;
        let done = bind_params(sql, params).execute(&mut *transaction).await?;
        transaction.commit().await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl DatabaseBackend for DatabaseConnectorSQLite {
    fn engine(&self) -> DatabaseDrivers {
        ENGINE
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch_rows(&self, sql: &str, params: &[Value], single: bool) -> Result<Vec<DatabaseRow>, DatabaseError> {
        let (mut connection, lease) = self.open().await?;
        let result = Self::fetch_on(&mut connection, sql, params, single).await;
        self.release(connection, lease).await;
        result
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DatabaseError> {
        let (mut connection, lease) = self.open().await?;
        let result = Self::execute_on(&mut connection, sql, params).await;
        self.release(connection, lease).await;
        result
    }

    async fn evolve_schema(&self) -> Result<(), DatabaseError> {
        let (mut connection, lease) = self.open().await?;
        let result = Self::apply_column_additions(&mut connection).await;
        self.release(connection, lease).await;
        result
    }

    fn active_connections(&self) -> usize {
        self.tracker.active()
    }
}

fn bind_params<'q>(sql: &'q str, params: &'q [Value]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<String>),
            Value::Bool(value) => query.bind(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    query.bind(value)
                } else if number.is_u64() {
                    // Above i64::MAX: SQLite has no unsigned 64-bit integer, so keep the exact digits.
                    query.bind(number.to_string())
                } else if let Some(value) = number.as_f64() {
                    query.bind(value)
                } else {
                    query.bind(number.to_string())
                }
            }
            Value::String(value) => query.bind(value.as_str()),
            other => query.bind(other.to_string()),
        };
    }
    query
}

/// SQLite rows carry no usable declared types for expressions, so each value
/// is decoded by the storage class it actually holds.
fn sqlite_row_to_map(row: &SqliteRow) -> DatabaseRow {
    let mut map = DatabaseRow::new();
    for (index, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), sqlite_value(row, index));
    }
    map
}

fn sqlite_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };
    match storage_class.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index).map(Value::from).unwrap_or(Value::Null),
        "REAL" => row.try_get::<f64, _>(index).map(Value::from).unwrap_or(Value::Null),
        "BLOB" => row.try_get::<Vec<u8>, _>(index).map(blob_value).unwrap_or(Value::Null),
        _ => row.try_get::<String, _>(index).map(Value::String).unwrap_or(Value::Null),
    }
}
