//! tsdetect-analysis: the test smell detection engine.
//!
//! - Parsers: tree-sitter Java parsing lowered into an owned syntax model
//! - Syntax: tagged-variant node types and a `Visit` trait
//! - Detectors: the `Detector` contract and the smell catalog
//! - Engine: the declarative registry and the class/method orchestrator
//! - Report: file pairs, code elements, verdicts, CSV and JSON writers

pub mod detectors;
pub mod engine;
pub mod parsers;
pub mod report;
pub mod syntax;

pub use detectors::{AnalysisContext, Detector, SmellKind};
pub use engine::{FileAnalysis, SmellDetector};
pub use parsers::JavaParser;
pub use report::{
    CodeElement, DetectorOutcome, ElementKind, FilePair, NotEvaluatedReason, Outcome, ReportGranularity,
    ReportRow, TestFileReport, Verdict,
};
pub use syntax::CompilationUnit;
