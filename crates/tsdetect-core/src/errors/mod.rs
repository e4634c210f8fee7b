//! Error handling for tsdetect.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod input_error;
pub mod output_error;
pub mod parse_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::ErrorCode;
pub use input_error::InputError;
pub use output_error::OutputError;
pub use parse_error::ParseError;

/// Top-level error for a tsdetect run.
/// Aggregates the fatal subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum TsdetectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl ErrorCode for TsdetectError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
        }
    }
}
