//! Run configuration: batch-level knobs for the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which report granularities a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Class,
    Method,
    #[default]
    Both,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" => Ok(Self::Class),
            "method" => Ok(Self::Method),
            "both" => Ok(Self::Both),
            other => Err(format!("expected class, method or both, got '{other}'")),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Both => "both",
        };
        f.write_str(s)
    }
}

/// Configuration for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Worker threads. Default: number of logical CPUs.
    pub threads: Option<usize>,
    /// Report granularity. Default: both.
    pub granularity: Option<Granularity>,
}

impl RunConfig {
    pub fn effective_granularity(&self) -> Granularity {
        self.granularity.unwrap_or_default()
    }
}
