//! tsdetect-core: shared infrastructure for the tsdetect workspace.
//!
//! - Errors: one `thiserror` enum per subsystem plus `ErrorCode`
//! - Config: layered TOML configuration (CLI > env > file > defaults)
//! - Tracing: `tracing-subscriber` initialisation driven by `TSDETECT_LOG`

pub mod config;
pub mod errors;
pub mod tracing;

pub use config::{CliOverrides, DetectionConfig, Granularity, RunConfig, TsdetectConfig};
pub use errors::{
    ConfigError, DetectionError, ErrorCode, InputError, OutputError, ParseError, TsdetectError,
};
