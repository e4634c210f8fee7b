//! Detection configuration: the versionable thresholds and name lists
//! consumed by the smell detectors.

use serde::{Deserialize, Serialize};

/// Default statement threshold for the Verbose Test smell.
pub const DEFAULT_VERBOSE_THRESHOLD: u32 = 30;

const DEFAULT_TEST_ANNOTATIONS: &[&str] = &["Test"];
const DEFAULT_IGNORE_ANNOTATIONS: &[&str] = &["Ignore", "Disabled"];
const DEFAULT_SETUP_ANNOTATIONS: &[&str] = &["Before", "BeforeEach"];

/// Configuration for the detector catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Annotations marking a test method. Default: `["Test"]`.
    pub test_annotations: Vec<String>,
    /// Annotations marking an ignored test. Default: `["Ignore", "Disabled"]`.
    pub ignore_annotations: Vec<String>,
    /// Annotations marking a fixture setup method. Default: `["Before", "BeforeEach"]`.
    pub setup_annotations: Vec<String>,
    /// A test with at least this many top-level statements is verbose.
    /// Default: 30.
    pub verbose_threshold: Option<u32>,
    /// Extra type names treated as external resources by Mystery Guest.
    pub mystery_guest_types: Vec<String>,
}

impl DetectionConfig {
    pub fn effective_test_annotations(&self) -> Vec<String> {
        or_defaults(&self.test_annotations, DEFAULT_TEST_ANNOTATIONS)
    }

    pub fn effective_ignore_annotations(&self) -> Vec<String> {
        or_defaults(&self.ignore_annotations, DEFAULT_IGNORE_ANNOTATIONS)
    }

    pub fn effective_setup_annotations(&self) -> Vec<String> {
        or_defaults(&self.setup_annotations, DEFAULT_SETUP_ANNOTATIONS)
    }

    /// Returns the effective verbose threshold, defaulting to 30.
    pub fn effective_verbose_threshold(&self) -> u32 {
        self.verbose_threshold.unwrap_or(DEFAULT_VERBOSE_THRESHOLD)
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}
