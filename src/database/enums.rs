//! Database enumeration types.

/// Supported database driver types (sqlite3, mysql).
pub mod database_drivers;

/// Errors raised by the data-access layer.
pub mod database_error;

/// Read results (single row or row list).
pub mod query_result;
