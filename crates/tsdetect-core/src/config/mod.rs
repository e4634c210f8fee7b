//! Configuration system for tsdetect.
//! TOML-based, layered resolution: CLI > env > config file > defaults.

pub mod detection_config;
pub mod run_config;
pub mod tsdetect_config;

pub use detection_config::DetectionConfig;
pub use run_config::{Granularity, RunConfig};
pub use tsdetect_config::{CliOverrides, TsdetectConfig};
