//! Detection errors.

use super::error_code::{self, ErrorCode};

/// Non-fatal errors raised while running a detector over one file pair.
/// They are recorded on the report and never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("Detector {id} panicked: {message}")]
    DetectorPanic { id: String, message: String },

    #[error("Detector {id} requires a production file and none was given")]
    MissingProduction { id: String },

    #[error("Detector {id} not evaluated: {reason}")]
    Unavailable { id: String, reason: String },
}

impl ErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
