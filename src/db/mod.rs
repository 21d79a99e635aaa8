//! Database module
//!
//! The ingredient catalog's SQLite pool and schema.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
pub use migrations::run_migrations;
