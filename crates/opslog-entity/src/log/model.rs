//! Operation log entry entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use opslog_core::error::AppError;
use opslog_core::result::AppResult;

/// An immutable log entry recording one operation of the processing tool.
///
/// Rows live in the `Logs` table. The timestamp is assigned by the store
/// at insert time in `DD/MM/YYYY HH:MM` form; callers never supply it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LogRecord {
    /// Store-assigned identifier, unique and never reused after deletion.
    #[sqlx(rename = "ID")]
    pub id: i64,
    /// When the operation was recorded, local clock, `DD/MM/YYYY HH:MM`.
    #[sqlx(rename = "Datetime")]
    pub datetime: String,
    /// The operation type (e.g. `"HASH"`, `"DELETE"`).
    #[serde(rename = "type")]
    #[sqlx(rename = "Type")]
    pub log_type: String,
    /// Input path the operation ran against.
    #[sqlx(rename = "Input")]
    pub input: String,
    /// Output path the operation produced.
    #[sqlx(rename = "Output")]
    pub output: String,
    /// Free-form diagnostic text.
    #[sqlx(rename = "Info")]
    pub info: String,
    /// Processed size in bytes.
    #[sqlx(rename = "Size")]
    pub size: i64,
    /// Whether the operation succeeded. Stored as 0/1, surfaced on the
    /// wire as the `check` field to match the processing tool.
    #[serde(rename = "check")]
    #[sqlx(rename = "Success")]
    pub success: bool,
}

/// A log submission exactly as received on the wire.
///
/// `size` and `check` keep their raw JSON values so the coercion rules
/// (integer-parseable size, truthy check) live in one explicit place
/// rather than in serde rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLogRecord {
    /// Operation type.
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    /// Input path.
    pub input: Option<String>,
    /// Output path.
    pub output: Option<String>,
    /// Diagnostic text.
    pub info: Option<String>,
    /// Processed size; accepted as a JSON integer or an integer string.
    pub size: Option<serde_json::Value>,
    /// Success flag; any JSON value, coerced by truthiness.
    pub check: Option<serde_json::Value>,
}

/// A validated log entry ready for insertion.
#[derive(Debug, Clone)]
pub struct NewLogRecord {
    /// Operation type.
    pub log_type: String,
    /// Input path.
    pub input: String,
    /// Output path.
    pub output: String,
    /// Diagnostic text.
    pub info: String,
    /// Processed size in bytes.
    pub size: i64,
    /// Success flag.
    pub success: bool,
}

impl NewLogRecord {
    /// Validate a raw submission into an insertable record.
    ///
    /// Fails with a validation error when a required field is missing or
    /// empty, or when `size` cannot be read as an integer. `check` is
    /// coerced by JSON truthiness and never fails.
    pub fn from_raw(raw: RawLogRecord) -> AppResult<Self> {
        let log_type = required_field(raw.log_type, "type")?;
        let input = required_field(raw.input, "input")?;
        let output = required_field(raw.output, "output")?;
        let info = required_field(raw.info, "info")?;

        let size = match raw.size {
            Some(value) => parse_size(&value)?,
            None => return Err(AppError::validation("Missing required field: size")),
        };

        let success = match raw.check {
            Some(value) => json_truthy(&value),
            None => return Err(AppError::validation("Missing required field: check")),
        };

        Ok(Self {
            log_type,
            input,
            output,
            info,
            size,
            success,
        })
    }
}

fn required_field(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AppError::validation(format!(
            "Missing required field: {name}"
        ))),
    }
}

/// Read a JSON value as an integer size. Integer numbers pass through;
/// strings are parsed; everything else is a validation error.
fn parse_size(value: &serde_json::Value) -> AppResult<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AppError::validation("Field 'size' must be an integer")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::validation("Field 'size' must be an integer")),
        _ => Err(AppError::validation("Field 'size' must be an integer")),
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects
/// are false; everything else is true.
fn json_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}
