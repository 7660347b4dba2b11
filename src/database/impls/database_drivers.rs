use crate::database::enums::database_drivers::DatabaseDrivers;
use std::fmt;

impl DatabaseDrivers {
    pub fn engine_name(&self) -> &'static str {
        match self {
            DatabaseDrivers::sqlite3 => "SQLite",
            DatabaseDrivers::mysql => "MySQL",
        }
    }

    pub fn log_prefix(&self) -> &'static str {
        match self {
            DatabaseDrivers::sqlite3 => "[SQLite]",
            DatabaseDrivers::mysql => "[MySQL]",
        }
    }

    /// Native bind-parameter marker. sqlx uses `?` for both engines.
    pub fn placeholder(&self) -> &'static str {
        match self {
            DatabaseDrivers::sqlite3 | DatabaseDrivers::mysql => "?",
        }
    }

    pub fn insert_ignore_prefix(&self) -> &'static str {
        match self {
            DatabaseDrivers::sqlite3 => "INSERT OR IGNORE INTO",
            DatabaseDrivers::mysql => "INSERT IGNORE INTO",
        }
    }
}

impl fmt::Display for DatabaseDrivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseDrivers::sqlite3 => write!(f, "sqlite3"),
            DatabaseDrivers::mysql => write!(f, "mysql"),
        }
    }
}
