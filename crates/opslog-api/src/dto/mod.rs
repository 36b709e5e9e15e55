//! Response DTOs.
//!
//! Request bodies deserialize straight into the entity crate's raw types
//! (`RawLogRecord`, `NewJobConfig`, `JobConfigPatch`), which own the
//! coercion rules; only response shapes live here.

pub mod response;

pub use response::{HealthResponse, MessageResponse};
