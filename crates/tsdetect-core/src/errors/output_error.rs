//! Report output errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write report to {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl ErrorCode for OutputError {
    fn error_code(&self) -> &'static str {
        error_code::OUTPUT_ERROR
    }
}
