//! # clubdata
//!
//! Data-access layer for a football club browser: clubs, players, trainers
//! and titles, stored either in a pooled MySQL/MariaDB database or in a local
//! SQLite file.
//!
//! ## Overview
//!
//! Callers write one dialect of SQL (`%s` placeholders, `INSERT OR IGNORE
//! INTO`) and hand it to a [`database::structs::database_connector::DatabaseConnector`].
//! The connector is resolved once at startup: a configured host selects MySQL,
//! anything else (or a failed MySQL setup) selects SQLite. Every call takes its
//! own connection and gives it back before returning, on success and on error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use serde_json::json;
//! use clubdata::config::structs::configuration::Configuration;
//! use clubdata::database::structs::database_connector::DatabaseConnector;
//!
//! let config = Arc::new(Configuration::load_from_file("config.toml", false)?);
//! let db = DatabaseConnector::new(config).await?;
//! db.db_write(
//!     "INSERT OR IGNORE INTO clubs (name, country, stadium) VALUES (%s, %s, %s)",
//!     &[json!("Arsenal"), json!("England"), json!("Emirates Stadium")],
//! ).await?;
//! let club = db.fetch_one("SELECT * FROM clubs WHERE name = %s", &[json!("Arsenal")]).await?;
//! ```
//!
//! ## Modules
//!
//! - [`common`] - Logging setup and the configuration error type
//! - [`config`] - Configuration file, environment overrides, validation
//! - [`database`] - Backend selection, schema, SQL normalization, execution
//! - [`structs`] - CLI argument parsing

/// Common utilities and shared functionality.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files
/// and the `DB_*` environment variables.
pub mod config;

/// Database backend module with MySQL and SQLite support.
///
/// Provides one read/write interface over both engines, including SQL
/// normalization, schema initialization and connection accounting.
pub mod database;

/// CLI argument parsing.
pub mod structs;
