//! Data-access layer with interchangeable MySQL and SQLite backends.
//!
//! Callers issue backend-neutral SQL (`%s` placeholders, `INSERT OR IGNORE INTO`)
//! through [`structs::database_connector::DatabaseConnector`]; the connector
//! rewrites it for the active engine, runs it on a connection scoped to the
//! call and hands back rows as insertion-ordered JSON maps.

/// Engine selection, error and result enumerations.
pub mod enums;

/// SQL dialect normalization.
pub mod helpers;

/// Implementation blocks for the connector structures.
pub mod impls;

/// Table definitions and additive schema evolution.
pub mod schema;

/// Connector structures for each backend.
pub mod structs;

/// The backend trait both engines implement.
pub mod traits;

/// Shared row and parameter types.
pub mod types;

#[cfg(test)]
mod tests;
