//! Per-file orchestration: parse a file pair once, run a fresh detector
//! set over it and fold the results into a `TestFileReport`.
//!
//! Nothing that goes wrong inside one pair escapes it. Parse failures,
//! missing production files and detector panics all become
//! `NotEvaluated` outcomes plus a warning on the report.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tsdetect_core::config::DetectionConfig;
use tsdetect_core::errors::{DetectionError, ErrorCode, ParseError};

use super::registry::{class_catalog, method_catalog, DetectorSpec};
use crate::detectors::AnalysisContext;
use crate::parsers::JavaParser;
use crate::report::{
    DetectorOutcome, FilePair, NotEvaluatedReason, Outcome, ReportGranularity, TestFileReport,
};
use crate::syntax::CompilationUnit;

/// Both granularity reports for one file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub class_level: TestFileReport,
    pub method_level: TestFileReport,
}

/// Parsed trees of one pair. Failures are kept, not propagated.
struct ParsedPair {
    test: Result<CompilationUnit, ParseError>,
    /// `None` when the pair has no production file.
    production: Option<Result<CompilationUnit, ParseError>>,
    warnings: Vec<String>,
}

/// Runs the detector catalog over file pairs. Owns its parser, so each
/// worker thread needs its own instance.
pub struct SmellDetector {
    parser: JavaParser,
    config: DetectionConfig,
}

impl SmellDetector {
    pub fn new(config: DetectionConfig) -> Result<Self, ParseError> {
        Ok(Self {
            parser: JavaParser::new()?,
            config,
        })
    }

    pub fn detect_class_level(&mut self, pair: &FilePair) -> TestFileReport {
        let parsed = self.parse_pair(pair);
        self.run(pair, &parsed, ReportGranularity::Class, class_catalog())
    }

    pub fn detect_method_level(&mut self, pair: &FilePair) -> TestFileReport {
        let parsed = self.parse_pair(pair);
        self.run(pair, &parsed, ReportGranularity::Method, method_catalog())
    }

    /// Parse once, then run both passes with independent detector sets.
    pub fn detect(&mut self, pair: &FilePair) -> FileAnalysis {
        let parsed = self.parse_pair(pair);
        FileAnalysis {
            class_level: self.run(pair, &parsed, ReportGranularity::Class, class_catalog()),
            method_level: self.run(pair, &parsed, ReportGranularity::Method, method_catalog()),
        }
    }

    fn parse_pair(&mut self, pair: &FilePair) -> ParsedPair {
        tracing::debug!(test = %pair.test_file_path, production = %pair.production_file_path, "parsing file pair");
        let mut warnings = Vec::new();

        let test = self.parser.parse_file(Path::new(&pair.test_file_path));
        if let Err(e) = &test {
            tracing::warn!(error = %e, "test file could not be parsed");
            warnings.push(e.coded_string());
        }

        let production = pair.has_production().then(|| {
            let result = self.parser.parse_file(Path::new(&pair.production_file_path));
            if let Err(e) = &result {
                tracing::warn!(error = %e, "production file could not be parsed");
                warnings.push(e.coded_string());
            }
            result
        });

        ParsedPair {
            test,
            production,
            warnings,
        }
    }

    fn run<'s>(
        &self,
        pair: &FilePair,
        parsed: &ParsedPair,
        granularity: ReportGranularity,
        catalog: impl Iterator<Item = &'s DetectorSpec>,
    ) -> TestFileReport {
        let test_type_name = pair.test_type_name();
        let production_type_name = pair.production_type_name();
        let mut warnings = parsed.warnings.clone();

        let detectors = catalog
            .map(|spec| {
                let outcome = self.run_one(
                    spec,
                    parsed,
                    &test_type_name,
                    production_type_name.as_deref(),
                    &mut warnings,
                );
                DetectorOutcome {
                    smell: spec.kind,
                    outcome,
                }
            })
            .collect();

        tracing::debug!(
            test = %pair.test_file_path,
            granularity = ?granularity,
            warnings = warnings.len(),
            "file pair analysed"
        );

        TestFileReport {
            file: pair.clone(),
            granularity,
            test_class: pair.test_file_name(),
            detectors,
            warnings,
        }
    }

    fn run_one(
        &self,
        spec: &DetectorSpec,
        parsed: &ParsedPair,
        test_type_name: &str,
        production_type_name: Option<&str>,
        warnings: &mut Vec<String>,
    ) -> Outcome {
        let name = spec.kind.name();

        let test = match &parsed.test {
            Ok(unit) => unit,
            Err(e) => return not_evaluated(name, NotEvaluatedReason::from(e), e.to_string()),
        };

        let production = match &parsed.production {
            Some(Ok(unit)) => Some(unit),
            Some(Err(e)) if spec.needs_production => {
                return not_evaluated(name, NotEvaluatedReason::from(e), e.to_string());
            }
            None if spec.needs_production => {
                let err = DetectionError::MissingProduction { id: name.to_string() };
                tracing::warn!(detector = name, "{err}");
                return Outcome::NotEvaluated {
                    reason: NotEvaluatedReason::MissingCounterpart,
                };
            }
            _ => None,
        };

        let ctx = AnalysisContext {
            test,
            production,
            test_type_name,
            production_type_name,
            config: &self.config,
        };

        let mut detector = spec.kind.build();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            detector.analyze(&ctx);
        }));

        match result {
            Ok(()) => Outcome::Evaluated {
                has_smell: detector.has_smell(),
                elements: detector.into_elements(),
            },
            Err(payload) => {
                let err = DetectionError::DetectorPanic {
                    id: name.to_string(),
                    message: panic_message(payload.as_ref()),
                };
                tracing::warn!(detector = name, "{err}");
                warnings.push(err.coded_string());
                Outcome::NotEvaluated {
                    reason: NotEvaluatedReason::DetectorFailed,
                }
            }
        }
    }
}

fn not_evaluated(name: &str, reason: NotEvaluatedReason, cause: String) -> Outcome {
    let err = DetectionError::Unavailable {
        id: name.to_string(),
        reason: cause,
    };
    tracing::warn!(detector = name, "{err}");
    Outcome::NotEvaluated { reason }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
