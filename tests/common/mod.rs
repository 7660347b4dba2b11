#![allow(dead_code)]
use clubdata::config::structs::configuration::Configuration;
use clubdata::database::structs::database_connector::DatabaseConnector;
use std::sync::Arc;
use tempfile::TempDir;

pub type TestConfig = Arc<Configuration>;

/// Keeps the directory alive for as long as the store is in use.
pub struct TestStore {
    pub dir: TempDir,
    pub config: TestConfig,
}

pub fn create_test_config(dir: &TempDir) -> TestConfig {
    let mut config: Configuration = Configuration::init();
    config.database.sqlite_path = dir.path().join("db.sqlite3").to_string_lossy().into_owned();
    config.database.log_queries = true;
    Arc::new(config)
}

pub fn create_test_store() -> TestStore {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    TestStore { dir, config }
}

pub async fn create_test_connector() -> (TestStore, DatabaseConnector) {
    let store = create_test_store();
    let connector = DatabaseConnector::new(store.config.clone()).await.unwrap();
    (store, connector)
}

/// Points the networked backend at a port nothing listens on.
pub fn create_unreachable_mysql_config(dir: &TempDir) -> TestConfig {
    let mut config: Configuration = (*create_test_config(dir)).clone();
    config.database.host = Some("127.0.0.1".to_string());
    config.database.port = Some(1);
    config.database.user = Some("club".to_string());
    config.database.password = Some("secret".to_string());
    config.database.database_name = Some("clubs".to_string());
    config.database.connect_timeout = 1;
    Arc::new(config)
}

pub async fn count_rows(connector: &DatabaseConnector, table: &str) -> i64 {
    let row = connector
        .fetch_one(&format!("SELECT COUNT(*) AS total FROM {}", table), &[])
        .await
        .unwrap()
        .unwrap();
    row.get("total").and_then(|value| value.as_i64()).unwrap()
}
