//! Batch input errors.

use super::error_code::{self, ErrorCode};

/// Errors reading the list of test/production file pairs.
/// These are the only errors fatal to a whole run.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Input path is a directory: {path}")]
    IsDirectory { path: String },

    #[error("Failed to read input file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed input on line {line}: {message}")]
    MalformedLine { line: usize, message: String },
}

impl ErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
