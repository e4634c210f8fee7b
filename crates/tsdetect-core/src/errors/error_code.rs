//! Structured error codes.

/// Every error enum implements this to expose a stable code string,
/// printed by the CLI as `[CODE] message`.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const SOURCE_NOT_FOUND: &str = "SOURCE_NOT_FOUND";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
