//! # opslog-store
//!
//! File-backed storage for the job configuration collection. The whole
//! collection lives in one JSON file and is rewritten atomically on every
//! mutation, serialized by a process-wide lock.

pub mod job_config;

pub use job_config::JobConfigStore;
