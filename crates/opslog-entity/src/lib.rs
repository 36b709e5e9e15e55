//! # opslog-entity
//!
//! Domain entity models for OpsLog. Every struct in this crate represents
//! a database table row, a stored JSON object, or a value parsed off the
//! wire. Database entities additionally derive `sqlx::FromRow`.

pub mod job;
pub mod log;
