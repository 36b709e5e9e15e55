//! Job configuration entity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One job configuration driving the processing tool: where to read,
/// where to write, and which operations to run in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobConfig {
    /// Store-generated opaque identifier.
    pub id: Uuid,
    /// Input path.
    pub input: String,
    /// Output path.
    pub output: String,
    /// Ordered operation names (e.g. `"HASH"`, `"DELETE"`).
    #[serde(default)]
    pub args: Vec<String>,
}

/// Data supplied to create a job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobConfig {
    /// Input path (required).
    pub input: Option<String>,
    /// Output path (required).
    pub output: Option<String>,
    /// Ordered operation names; defaults to empty.
    pub args: Option<Vec<String>>,
}

/// A partial update: only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobConfigPatch {
    /// New input path.
    pub input: Option<String>,
    /// New output path.
    pub output: Option<String>,
    /// New operation list (replaces the whole list).
    pub args: Option<Vec<String>>,
}

impl JobConfigPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none() && self.args.is_none()
    }
}
