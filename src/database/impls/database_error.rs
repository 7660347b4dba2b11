use crate::database::enums::database_error::DatabaseError;
use sqlx::mysql::MySqlDatabaseError;

const SQLITE_BUSY: i64 = 5;
const SQLITE_LOCKED: i64 = 6;
const MYSQL_LOCK_WAIT_TIMEOUT: u16 = 1205;
const MYSQL_DEADLOCK: u16 = 1213;

impl DatabaseError {
    pub fn is_busy(&self) -> bool {
        matches!(self, DatabaseError::Busy(_))
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, DatabaseError::Setup(_))
    }
}

/// Lock contention is split out of the generic SQL error so callers can tell
/// it apart from bad SQL or constraint violations.
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if let Some(db_error) = error.as_database_error() {
            if let Some(mysql_error) = db_error.try_downcast_ref::<MySqlDatabaseError>() {
                if matches!(mysql_error.number(), MYSQL_LOCK_WAIT_TIMEOUT | MYSQL_DEADLOCK) {
                    return DatabaseError::Busy(mysql_error.message().to_string());
                }
            } else if let Some(code) = db_error.code().and_then(|code| code.parse::<i64>().ok()) {
                // Extended SQLite result codes carry the primary code in the low byte.
                if matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED) {
                    return DatabaseError::Busy(db_error.message().to_string());
                }
            }
        }
        DatabaseError::Sqlx(error)
    }
}
