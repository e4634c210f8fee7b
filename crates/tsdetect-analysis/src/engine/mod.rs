//! Detection engine: the detector catalog and the per-file orchestrator.

pub mod orchestrator;
pub mod registry;

pub use orchestrator::{FileAnalysis, SmellDetector};
pub use registry::{class_catalog, method_catalog, DetectorSpec, CATALOG};
