//! Job configuration entities.

pub mod model;

pub use model::{JobConfig, JobConfigPatch, NewJobConfig};
