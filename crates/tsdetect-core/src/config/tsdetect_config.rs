//! Top-level tsdetect configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectionConfig, Granularity, RunConfig};
use crate::errors::ConfigError;

/// Name of the project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "tsdetect.toml";

/// Detection and run settings for one tsdetect invocation.
///
/// Layers, highest priority first:
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TSDETECT_*`)
/// 3. Config file (`--config` path, else `tsdetect.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TsdetectConfig {
    pub detection: DetectionConfig,
    pub run: RunConfig,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threads: Option<usize>,
    pub granularity: Option<Granularity>,
    pub verbose_threshold: Option<u32>,
}

impl TsdetectConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `tsdetect.toml`
    /// under `root` is merged when present.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Parse a config from TOML text without touching env or disk.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Reject zero thresholds and blank annotation names.
    pub fn validate(config: &TsdetectConfig) -> Result<(), ConfigError> {
        if config.detection.verbose_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "detection.verbose_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.run.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "run.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let blank = config
            .detection
            .test_annotations
            .iter()
            .chain(&config.detection.ignore_annotations)
            .chain(&config.detection.setup_annotations)
            .any(|a| a.trim().is_empty());
        if blank {
            return Err(ConfigError::InvalidValue {
                field: "detection".to_string(),
                message: "annotation names must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Read `path` and fold it into `config`.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut TsdetectConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TsdetectConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut TsdetectConfig, other: &TsdetectConfig) {
        // Detection
        if !other.detection.test_annotations.is_empty() {
            base.detection.test_annotations = other.detection.test_annotations.clone();
        }
        if !other.detection.ignore_annotations.is_empty() {
            base.detection.ignore_annotations = other.detection.ignore_annotations.clone();
        }
        if !other.detection.setup_annotations.is_empty() {
            base.detection.setup_annotations = other.detection.setup_annotations.clone();
        }
        if other.detection.verbose_threshold.is_some() {
            base.detection.verbose_threshold = other.detection.verbose_threshold;
        }
        if !other.detection.mystery_guest_types.is_empty() {
            base.detection.mystery_guest_types = other.detection.mystery_guest_types.clone();
        }

        // Run
        if other.run.threads.is_some() {
            base.run.threads = other.run.threads;
        }
        if other.run.granularity.is_some() {
            base.run.granularity = other.run.granularity;
        }
    }

    /// Apply `TSDETECT_*` environment variables. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut TsdetectConfig) {
        if let Ok(val) = std::env::var("TSDETECT_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TSDETECT_GRANULARITY") {
            match val.parse::<Granularity>() {
                Ok(v) => config.run.granularity = Some(v),
                Err(message) => {
                    tracing::warn!(%message, "ignoring TSDETECT_GRANULARITY");
                }
            }
        }
        if let Ok(val) = std::env::var("TSDETECT_VERBOSE_THRESHOLD") {
            if let Ok(v) = val.parse::<u32>() {
                config.detection.verbose_threshold = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut TsdetectConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threads {
            config.run.threads = Some(v);
        }
        if let Some(v) = cli.granularity {
            config.run.granularity = Some(v);
        }
        if let Some(v) = cli.verbose_threshold {
            config.detection.verbose_threshold = Some(v);
        }
    }

    /// Render the resolved config as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
