use crate::config::structs::database_config::DatabaseConfig;
use crate::database::structs::connection_params::ConnectionParams;

pub const DEFAULT_POOL_SIZE: u32 = 5;
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 30;
pub const DEFAULT_SQLITE_PATH: &str = "db.sqlite3";

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: None,
            port: None,
            user: None,
            password: None,
            database_name: None,
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            sqlite_path: String::from(DEFAULT_SQLITE_PATH),
            log_queries: true,
        }
    }
}

impl DatabaseConfig {
    /// Networked parameters, present only when a non-blank host is set.
    pub fn connection_params(&self) -> Option<ConnectionParams> {
        let host = self.host.as_deref().map(str::trim).filter(|host| !host.is_empty())?;
        Some(ConnectionParams {
            host: host.to_string(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database_name: self.database_name.clone(),
        })
    }
}
