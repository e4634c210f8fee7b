//! Report model: file pair identity, code elements, verdicts and the
//! per-file report consumed by the writers.

pub mod types;
pub mod writer;

pub use types::*;
pub use writer::{write_json, CsvReportWriter};
