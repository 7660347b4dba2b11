//! Configuration management module.
//!
//! Loads `config.toml`, applies the `DB_*` environment overrides the web
//! application is deployed with, and validates the result.
//!
//! # Configuration Structure
//!
//! - **log_level**: `off`, `trace`, `debug`, `info`, `warn` or `error`
//! - **database**: networked connection parameters, pool size, SQLite file
//!   path and the query-logging switch
//!
//! # Example
//!
//! ```rust,ignore
//! use clubdata::config::structs::configuration::Configuration;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let params = config.database.connection_params();
//! ```

/// Configuration enumerations.
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;
