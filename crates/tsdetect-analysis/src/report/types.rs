//! Report types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tsdetect_core::errors::ParseError;

use crate::detectors::SmellKind;

/// One analysis unit: a test file and its optional production file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePair {
    pub app: String,
    pub test_file_path: String,
    /// Empty when the test has no paired production file.
    pub production_file_path: String,
    pub relative_test_file_path: String,
    pub relative_production_file_path: String,
}

impl FilePair {
    pub fn new(
        app: impl Into<String>,
        test_file_path: impl Into<String>,
        production_file_path: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            test_file_path: test_file_path.into(),
            production_file_path: production_file_path.into(),
            ..Default::default()
        }
    }

    pub fn has_production(&self) -> bool {
        !self.production_file_path.trim().is_empty()
    }

    /// File name of the test file, extension included (`FooTest.java`).
    pub fn test_file_name(&self) -> String {
        file_name(&self.test_file_path)
    }

    /// Test file name without extension; the expected test class name.
    pub fn test_type_name(&self) -> String {
        file_stem(&self.test_file_path)
    }

    pub fn production_type_name(&self) -> Option<String> {
        self.has_production()
            .then(|| file_stem(&self.production_file_path))
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// What a code element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Class,
    Method,
}

/// The unit a verdict attaches to: a test class or a single test method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeElement {
    pub name: String,
    pub kind: ElementKind,
    pub has_smell: bool,
    pub metrics: BTreeMap<String, String>,
}

impl CodeElement {
    pub fn class(name: impl Into<String>, has_smell: bool) -> Self {
        Self::new(name, ElementKind::Class, has_smell)
    }

    pub fn method(name: impl Into<String>, has_smell: bool) -> Self {
        Self::new(name, ElementKind::Method, has_smell)
    }

    fn new(name: impl Into<String>, kind: ElementKind, has_smell: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            has_smell,
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_metric(mut self, name: &str, value: impl ToString) -> Self {
        self.metrics.insert(name.to_string(), value.to_string());
        self
    }

    pub fn metric(&self, name: &str) -> Option<&str> {
        self.metrics.get(name).map(String::as_str)
    }
}

/// Why a detector produced no verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotEvaluatedReason {
    /// A referenced source file does not exist.
    SourceNotFound,
    /// A source file exists but is not valid Java.
    ParseFailure,
    /// The detector needs a production file and the pair has none.
    MissingCounterpart,
    /// The detector itself failed.
    DetectorFailed,
    /// The detector emitted no element for this method.
    NoElement,
}

impl From<&ParseError> for NotEvaluatedReason {
    fn from(err: &ParseError) -> Self {
        if err.is_not_found() {
            Self::SourceNotFound
        } else {
            Self::ParseFailure
        }
    }
}

/// A three-valued smell outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Verdict {
    Evaluated(bool),
    NotEvaluated(NotEvaluatedReason),
}

impl Verdict {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Evaluated(b) => Some(*b),
            Self::NotEvaluated(_) => None,
        }
    }
}

/// `true`, `false`, or empty when not evaluated.
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evaluated(true) => f.write_str("true"),
            Self::Evaluated(false) => f.write_str("false"),
            Self::NotEvaluated(_) => Ok(()),
        }
    }
}

/// Result of one detector over one file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// `has_smell` is the detector's own file-level roll-up.
    Evaluated {
        has_smell: bool,
        elements: Vec<CodeElement>,
    },
    NotEvaluated { reason: NotEvaluatedReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectorOutcome {
    pub smell: SmellKind,
    pub outcome: Outcome,
}

impl DetectorOutcome {
    pub fn name(&self) -> &'static str {
        self.smell.name()
    }

    pub fn elements(&self) -> &[CodeElement] {
        match &self.outcome {
            Outcome::Evaluated { elements, .. } => elements,
            Outcome::NotEvaluated { .. } => &[],
        }
    }

    /// The class-level cell.
    pub fn file_verdict(&self) -> Verdict {
        match &self.outcome {
            Outcome::Evaluated { has_smell, .. } => Verdict::Evaluated(*has_smell),
            Outcome::NotEvaluated { reason } => Verdict::NotEvaluated(*reason),
        }
    }

    /// Verdict for a named element. Overloads share a name; the last
    /// declared one wins.
    pub fn element_verdict(&self, name: &str) -> Verdict {
        match &self.outcome {
            Outcome::Evaluated { elements, .. } => elements
                .iter()
                .rfind(|e| e.name == name)
                .map(|e| Verdict::Evaluated(e.has_smell))
                .unwrap_or(Verdict::NotEvaluated(NotEvaluatedReason::NoElement)),
            Outcome::NotEvaluated { reason } => Verdict::NotEvaluated(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportGranularity {
    Class,
    Method,
}

/// One table row: empty `test_method` for class-level rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub test_method: String,
    /// Aligned with the report's detector order.
    pub verdicts: Vec<Verdict>,
}

/// Everything one granularity pass learned about one file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestFileReport {
    pub file: FilePair,
    pub granularity: ReportGranularity,
    /// `TestClass` column: the test file name.
    pub test_class: String,
    pub detectors: Vec<DetectorOutcome>,
    /// Non-fatal problems met while analysing this pair.
    pub warnings: Vec<String>,
}

impl TestFileReport {
    pub fn smell_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(DetectorOutcome::name).collect()
    }

    pub fn outcome(&self, smell: SmellKind) -> Option<&DetectorOutcome> {
        self.detectors.iter().find(|d| d.smell == smell)
    }

    /// Distinct element names across all detectors, first-seen order.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for detector in &self.detectors {
            for element in detector.elements() {
                if !names.contains(&element.name.as_str()) {
                    names.push(&element.name);
                }
            }
        }
        names
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        match self.granularity {
            ReportGranularity::Class => vec![ReportRow {
                test_method: String::new(),
                verdicts: self.detectors.iter().map(DetectorOutcome::file_verdict).collect(),
            }],
            ReportGranularity::Method => self
                .method_names()
                .into_iter()
                .map(|name| ReportRow {
                    test_method: name.to_string(),
                    verdicts: self
                        .detectors
                        .iter()
                        .map(|d| d.element_verdict(name))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(smell: SmellKind, elements: Vec<CodeElement>) -> DetectorOutcome {
        DetectorOutcome {
            smell,
            outcome: Outcome::Evaluated {
                has_smell: elements.iter().any(|e| e.has_smell),
                elements,
            },
        }
    }

    #[test]
    fn test_file_pair_names() {
        let pair = FilePair::new("app", "/src/app/test/FooTest.java", "");
        assert_eq!(pair.test_file_name(), "FooTest.java");
        assert_eq!(pair.test_type_name(), "FooTest");
        assert!(!pair.has_production());
        assert_eq!(pair.production_type_name(), None);
    }

    #[test]
    fn test_verdict_rendering() {
        assert_eq!(Verdict::Evaluated(true).to_string(), "true");
        assert_eq!(Verdict::Evaluated(false).to_string(), "false");
        assert_eq!(
            Verdict::NotEvaluated(NotEvaluatedReason::ParseFailure).to_string(),
            ""
        );
    }

    #[test]
    fn test_method_rows_mark_missing_elements_unknown() {
        let report = TestFileReport {
            file: FilePair::default(),
            granularity: ReportGranularity::Method,
            test_class: "FooTest.java".into(),
            detectors: vec![
                evaluated(
                    SmellKind::EmptyTest,
                    vec![CodeElement::method("testA", true), CodeElement::method("testB", false)],
                ),
                evaluated(SmellKind::PrintStatement, vec![CodeElement::method("testB", true)]),
            ],
            warnings: Vec::new(),
        };

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].test_method, "testA");
        assert_eq!(
            rows[0].verdicts,
            vec![
                Verdict::Evaluated(true),
                Verdict::NotEvaluated(NotEvaluatedReason::NoElement)
            ]
        );
        assert_eq!(
            rows[1].verdicts,
            vec![Verdict::Evaluated(false), Verdict::Evaluated(true)]
        );
    }

    #[test]
    fn test_class_row_rolls_up_elements() {
        let report = TestFileReport {
            file: FilePair::default(),
            granularity: ReportGranularity::Class,
            test_class: "FooTest.java".into(),
            detectors: vec![
                evaluated(
                    SmellKind::EmptyTest,
                    vec![CodeElement::method("testA", false), CodeElement::method("testB", true)],
                ),
                DetectorOutcome {
                    smell: SmellKind::EagerTest,
                    outcome: Outcome::NotEvaluated {
                        reason: NotEvaluatedReason::MissingCounterpart,
                    },
                },
            ],
            warnings: Vec::new(),
        };

        let rows = report.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].test_method, "");
        assert_eq!(
            rows[0].verdicts,
            vec![
                Verdict::Evaluated(true),
                Verdict::NotEvaluated(NotEvaluatedReason::MissingCounterpart)
            ]
        );
    }

    #[test]
    fn test_overloaded_methods_report_last_declaration() {
        let outcome = evaluated(
            SmellKind::EmptyTest,
            vec![
                CodeElement::method("testX", false),
                CodeElement::method("testX", true),
            ],
        );
        assert_eq!(outcome.element_verdict("testX"), Verdict::Evaluated(true));

        let report = TestFileReport {
            file: FilePair::default(),
            granularity: ReportGranularity::Method,
            test_class: "FooTest.java".into(),
            detectors: vec![outcome],
            warnings: Vec::new(),
        };
        let rows = report.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verdicts, vec![Verdict::Evaluated(true)]);
    }

    #[test]
    fn test_file_verdict_uses_stored_roll_up() {
        let outcome = DetectorOutcome {
            smell: SmellKind::DefaultTest,
            outcome: Outcome::Evaluated {
                has_smell: true,
                elements: Vec::new(),
            },
        };
        assert_eq!(outcome.file_verdict(), Verdict::Evaluated(true));
    }
}
