//! Operation log entities and filter types.

pub mod filter;
pub mod model;

pub use filter::{LogFilter, RawLogQuery};
pub use model::{LogRecord, NewLogRecord, RawLogRecord};
