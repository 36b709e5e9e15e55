//! Request handlers, organized by domain.

pub mod health;
pub mod job_config;
pub mod log;
