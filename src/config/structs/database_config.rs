use serde::{Deserialize, Serialize};

/// `[database]` section. A non-empty `host` selects the networked backend;
/// `sqlite_path` is used otherwise and as the fallback.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database_name: Option<String>,
    pub pool_size: u32,
    /// Seconds to wait for a pooled connection, including the initial connect.
    pub connect_timeout: u64,
    pub sqlite_path: String,
    pub log_queries: bool,
}
