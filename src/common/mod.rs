//! Common utilities and shared functionality.
//!
//! # Utilities
//!
//! - Logging setup (`fern` dispatcher over the `log` facade)
//! - Log level parsing
//!
//! # Data Structures
//!
//! - `CustomError` - Custom error type
//!
//! # Example
//!
//! ```rust,ignore
//! use clubdata::common::common::setup_logging;
//!
//! setup_logging(&config)?;
//! ```

/// Common data structures.
pub mod structs;

/// Core utility functions.
#[allow(clippy::module_inception)]
pub mod common;

/// Implementation blocks for common types.
pub mod impls;
