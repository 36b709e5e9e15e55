//! Repository implementations.

pub mod log;
