//! # opslog-database
//!
//! SQLite connection management, schema initialization, and the concrete
//! log repository for OpsLog.

pub mod connection;
pub mod repositories;
pub mod schema;

pub use connection::create_pool;
