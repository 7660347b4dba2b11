use crate::config::structs::database_config::DatabaseConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::enums::database_error::DatabaseError;
use crate::database::schema::{is_ignorable_schema_error, COLUMN_ADDITIONS};
use crate::database::structs::connection_params::ConnectionParams;
use crate::database::structs::connection_tracker::{ConnectionLease, ConnectionTracker};
use crate::database::structs::database_connector::DatabaseConnector;
use crate::database::structs::database_connector_mysql::DatabaseConnectorMySQL;
use crate::database::traits::database_backend::DatabaseBackend;
use crate::database::types::{blob_value, DatabaseRow};
use async_trait::async_trait;
use log::{debug, error, info};
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlPoolOptions, MySqlRow};
use sqlx::pool::PoolConnection;
use sqlx::query::Query;
use sqlx::{Column, ConnectOptions, Connection, MySql, Row, TypeInfo, ValueRef};
use std::time::Duration;

const ENGINE: DatabaseDrivers = DatabaseDrivers::mysql;

impl DatabaseConnectorMySQL {
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn create(params: &ConnectionParams, config: &DatabaseConfig) -> Result<DatabaseConnectorMySQL, DatabaseError> {
        let options = params
            .mysql_options()
            .log_statements(log::LevelFilter::Debug)
            .log_slow_statements(log::LevelFilter::Debug, Duration::from_secs(1));
        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .connect_with(options)
            .await
            .map_err(|error| DatabaseError::Setup(format!("unable to connect to {}: {}", params.redacted(), error)))?;
        Ok(DatabaseConnectorMySQL {
            pool,
            tracker: ConnectionTracker::new(),
        })
    }

    /// Connects the pool and runs the schema-evolution probe. Either failing
    /// is reported to the selector, which falls back to SQLite.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn database_connector(
        params: &ConnectionParams,
        config: &DatabaseConfig,
    ) -> Result<DatabaseConnector, DatabaseError> {
        let mysql = DatabaseConnectorMySQL::create(params, config).await?;
        if let Err(probe_error) = mysql.evolve_schema().await {
            error!("{} Schema probe failed on {}: {}", ENGINE.log_prefix(), params.redacted(), probe_error);
            mysql.pool.close().await;
            return Err(probe_error);
        }
        info!("[BOOT] Using MySQL on {} (pool size {})", params.redacted(), config.pool_size);
        Ok(DatabaseConnector {
            mysql: Some(mysql),
            sqlite: None,
            engine: ENGINE,
            log_queries: config.log_queries,
        })
    }

    async fn acquire(&self) -> Result<(PoolConnection<MySql>, ConnectionLease), DatabaseError> {
        let connection = self.pool.acquire().await?;
        Ok((connection, self.tracker.lease()))
    }

    async fn apply_column_additions(connection: &mut MySqlConnection) -> Result<(), DatabaseError> {
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

    async fn fetch_on(
        connection: &mut MySqlConnection,
        sql: &str,
        params: &[Value],
        single: bool,
    ) -> Result<Vec<DatabaseRow>, DatabaseError> {
        let query = bind_params(sql, params);
        if single {
            let row = query.fetch_optional(&mut *connection).await?;
            return row.iter().map(mysql_row_to_map).collect();
        }
        let rows = query.fetch_all(&mut *connection).await?;
        rows.iter().map(mysql_row_to_map).collect()
    }

    async fn execute_on(connection: &mut MySqlConnection, sql: &str, params: &[Value]) -> Result<u64, DatabaseError> {
        let mut transaction = connection.begin().await?;
        let done = bind_params(sql, params).execute(&mut *transaction).await?;
        transaction.commit().await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl DatabaseBackend for DatabaseConnectorMySQL {
    fn engine(&self) -> DatabaseDrivers {
        ENGINE
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch_rows(&self, sql: &str, params: &[Value], single: bool) -> Result<Vec<DatabaseRow>, DatabaseError> {
        let (mut connection, _lease) = self.acquire().await?;
        Self::fetch_on(&mut connection, sql, params, single).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DatabaseError> {
        let (mut connection, _lease) = self.acquire().await?;
        Self::execute_on(&mut connection, sql, params).await
    }

    async fn evolve_schema(&self) -> Result<(), DatabaseError> {
        let (mut connection, _lease) = self.acquire().await?;
        Self::apply_column_additions(&mut connection).await
    }

    fn active_connections(&self) -> usize {
        self.tracker.active()
    }
}

fn bind_params<'q>(sql: &'q str, params: &'q [Value]) -> Query<'q, MySql, MySqlArguments> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<String>),
            Value::Bool(value) => query.bind(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    query.bind(value)
                } else if let Some(value) = number.as_u64() {
                    query.bind(value)
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

fn mysql_row_to_map(row: &MySqlRow) -> Result<DatabaseRow, DatabaseError> {
    let mut map = DatabaseRow::new();
    for (index, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), mysql_value(row, index)?);
    }
    Ok(map)
}

/// How a MySQL column is read into the value model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MySqlValueKind {
    Null,
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    Json,
    Time,
    Date,
    DateTime,
    Text,
    Bytes,
}

/// Maps a column type name as reported by the driver to its decoding.
/// Unknown names yield `None` and surface as a decode error.
fn mysql_value_kind(type_name: &str) -> Option<MySqlValueKind> {
    if type_name.ends_with(" UNSIGNED") {
        return Some(MySqlValueKind::Unsigned);
    }
    let kind = match type_name {
        "NULL" => MySqlValueKind::Null,
        "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => MySqlValueKind::Signed,
        "FLOAT" => MySqlValueKind::Float,
        "DOUBLE" => MySqlValueKind::Double,
        "DECIMAL" => MySqlValueKind::Decimal,
        "JSON" => MySqlValueKind::Json,
        "TIME" => MySqlValueKind::Time,
        "DATE" => MySqlValueKind::Date,
        "DATETIME" | "TIMESTAMP" => MySqlValueKind::DateTime,
        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => MySqlValueKind::Text,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT" | "GEOMETRY" => {
            MySqlValueKind::Bytes
        }
        _ => return None,
    };
    Some(kind)
}

/// DECIMAL arrives as its exact text; integral values stay integers, the rest
/// become floats. Text that is not a number is kept as text.
fn decimal_value(text: String) -> Value {
    match text.parse::<serde_json::Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(text),
    }
}

fn json_value(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

fn mysql_value(row: &MySqlRow, index: usize) -> Result<Value, DatabaseError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let Some(kind) = mysql_value_kind(&type_name) else {
        return Err(DatabaseError::Decode(format!(
            "column {} has unsupported type {}",
            index, type_name
        )));
    };
    let value = match kind {
        MySqlValueKind::Null => Value::Null,
        MySqlValueKind::Signed => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        MySqlValueKind::Unsigned => Value::from(row.try_get_unchecked::<u64, _>(index)?),
        MySqlValueKind::Float => Value::from(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        MySqlValueKind::Double => Value::from(row.try_get_unchecked::<f64, _>(index)?),
        MySqlValueKind::Decimal => decimal_value(row.try_get_unchecked::<String, _>(index)?),
        MySqlValueKind::Json => json_value(row.try_get_unchecked::<String, _>(index)?),
        MySqlValueKind::Time => {
            let time = row.try_get::<chrono::NaiveTime, _>(index)?;
            Value::String(time.format("%H:%M:%S%.f").to_string())
        }
        MySqlValueKind::Date => Value::String(row.try_get::<chrono::NaiveDate, _>(index)?.to_string()),
        MySqlValueKind::DateTime => {
            let datetime = row.try_get::<chrono::NaiveDateTime, _>(index)?;
            Value::String(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
        }
        MySqlValueKind::Text => Value::String(row.try_get_unchecked::<String, _>(index)?),
        MySqlValueKind::Bytes => blob_value(row.try_get_unchecked::<Vec<u8>, _>(index)?),
    };
    Ok(value)
}
