#[cfg(test)]
mod database_tests {
    use crate::database::enums::database_drivers::DatabaseDrivers;
    use crate::database::enums::database_error::DatabaseError;
    use crate::database::helpers::normalize_sql;
    use crate::database::schema::is_ignorable_schema_error;
    use crate::database::structs::database_connector::DatabaseConnector;
    use crate::database::structs::database_connector_sqlite::DatabaseConnectorSQLite;
    use serde_json::{json, Value};
    use sqlx::{ConnectOptions, Connection};
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> String {
        dir.path().join("clubs.sqlite3").to_string_lossy().into_owned()
    }

    mod dispatch_tests {
        use super::*;

        fn detached(engine: DatabaseDrivers) -> DatabaseConnector {
            DatabaseConnector {
                mysql: None,
                sqlite: None,
                engine,
                log_queries: false,
            }
        }

        #[tokio::test]
        async fn test_missing_backend_is_not_connected() {
            for engine in [DatabaseDrivers::sqlite3, DatabaseDrivers::mysql] {
                let connector = detached(engine);
                assert!(matches!(connector.backend(), Err(DatabaseError::NotConnected)));
                assert!(matches!(connector.fetch_one("SELECT 1", &[]).await, Err(DatabaseError::NotConnected)));
                assert!(matches!(connector.db_write("DELETE FROM clubs", &[]).await, Err(DatabaseError::NotConnected)));
                assert!(matches!(connector.init_schema().await, Err(DatabaseError::NotConnected)));
                assert_eq!(connector.active_connections(), 0);
            }
        }

        #[test]
        fn test_neutral_statement_for_each_engine() {
            let sql = "INSERT OR IGNORE INTO clubs (name, country, stadium) VALUES (%s, %s, %s)";
            assert_eq!(
                normalize_sql(DatabaseDrivers::sqlite3, sql),
                "INSERT OR IGNORE INTO clubs (name, country, stadium) VALUES (?, ?, ?)"
            );
            assert_eq!(
                normalize_sql(DatabaseDrivers::mysql, sql),
                "INSERT IGNORE INTO clubs (name, country, stadium) VALUES (?, ?, ?)"
            );
        }
    }

    mod sqlite_tests {
        use super::*;

        #[tokio::test]
        async fn test_duplicate_column_is_ignorable() {
            let dir = TempDir::new().unwrap();
            let path = store_path(&dir);
            let mut connection = DatabaseConnectorSQLite::connect_options(&path).connect().await.unwrap();
            sqlx::query("CREATE TABLE clubs (id INTEGER PRIMARY KEY)")
                .execute(&mut connection)
                .await
                .unwrap();
            sqlx::query("ALTER TABLE clubs ADD COLUMN uuid TEXT")
                .execute(&mut connection)
                .await
                .unwrap();
            let duplicate = sqlx::query("ALTER TABLE clubs ADD COLUMN uuid TEXT")
                .execute(&mut connection)
                .await
                .unwrap_err();
            assert!(is_ignorable_schema_error(DatabaseDrivers::sqlite3, &duplicate));

            let existing = sqlx::query("CREATE TABLE clubs (id INTEGER PRIMARY KEY)")
                .execute(&mut connection)
                .await
                .unwrap_err();
            assert!(is_ignorable_schema_error(DatabaseDrivers::sqlite3, &existing));

            let missing = sqlx::query("ALTER TABLE stadiums ADD COLUMN uuid TEXT")
                .execute(&mut connection)
                .await
                .unwrap_err();
            assert!(!is_ignorable_schema_error(DatabaseDrivers::sqlite3, &missing));
            connection.close().await.unwrap();
        }

        #[tokio::test]
        async fn test_values_follow_storage_class() {
            let dir = TempDir::new().unwrap();
            let connector = DatabaseConnectorSQLite::database_connector(&store_path(&dir), false)
                .await
                .unwrap();
            let row = connector
                .fetch_one(
                    "SELECT 7 AS wins, 2.5 AS ratio, 'Highbury' AS stadium, NULL AS closed, X'00ff' AS crest, X'4869' AS motto",
                    &[],
                )
                .await
                .unwrap()
                .unwrap();
            assert_eq!(row.get("wins"), Some(&json!(7)));
            assert_eq!(row.get("ratio"), Some(&json!(2.5)));
            assert_eq!(row.get("stadium"), Some(&json!("Highbury")));
            assert_eq!(row.get("closed"), Some(&Value::Null));
            assert_eq!(row.get("crest"), Some(&json!("00ff")));
            assert_eq!(row.get("motto"), Some(&json!("Hi")));
        }

        #[tokio::test]
        async fn test_bound_parameter_kinds() {
            let dir = TempDir::new().unwrap();
            let connector = DatabaseConnectorSQLite::database_connector(&store_path(&dir), false)
                .await
                .unwrap();
            let row = connector
                .fetch_one(
                    "SELECT %s AS flag, %s AS year, %s AS ratio, %s AS name, %s AS missing",
                    &[json!(true), json!(1886), json!(0.75), json!("Arsenal"), Value::Null],
                )
                .await
                .unwrap()
                .unwrap();
            assert_eq!(row.get("flag"), Some(&json!(1)));
            assert_eq!(row.get("year"), Some(&json!(1886)));
            assert_eq!(row.get("ratio"), Some(&json!(0.75)));
            assert_eq!(row.get("name"), Some(&json!("Arsenal")));
            assert_eq!(row.get("missing"), Some(&Value::Null));
        }

        #[tokio::test]
        async fn test_unsigned_above_signed_range_keeps_digits() {
            let dir = TempDir::new().unwrap();
            let connector = DatabaseConnectorSQLite::database_connector(&store_path(&dir), false)
                .await
                .unwrap();
            let row = connector
                .fetch_one("SELECT %s AS supporters, %s AS founded", &[json!(u64::MAX), json!(1886u64)])
                .await
                .unwrap()
                .unwrap();
            assert_eq!(row.get("supporters"), Some(&json!("18446744073709551615")));
            assert_eq!(row.get("founded"), Some(&json!(1886)));
        }

        #[tokio::test]
        async fn test_clones_share_accounting() {
            let dir = TempDir::new().unwrap();
            let connector = DatabaseConnectorSQLite::database_connector(&store_path(&dir), false)
                .await
                .unwrap();
            let clone = connector.clone();
            clone.ping().await.unwrap();
            assert_eq!(connector.active_connections(), 0);
            assert_eq!(clone.engine(), DatabaseDrivers::sqlite3);
        }
    }
}
