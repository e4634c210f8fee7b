//! Report writers: a CSV table shared by both granularities, and JSON.

use std::io::Write;

use tsdetect_core::errors::OutputError;

use super::types::TestFileReport;
use crate::engine::registry::smell_names;

/// Columns preceding the smell columns.
pub const LEADING_COLUMNS: &[&str] = &[
    "App",
    "TestClass",
    "TestMethod",
    "TestFilePath",
    "ProductionFilePath",
    "RelativeTestFilePath",
    "RelativeProductionFilePath",
];

/// Streams report rows as CSV. The header lists every catalog smell, so
/// class and method rows fit one table; a smell missing from a row's
/// detector set leaves its cell empty.
pub struct CsvReportWriter<W: Write> {
    out: W,
    target: String,
    smells: Vec<&'static str>,
    header_written: bool,
}

impl<W: Write> CsvReportWriter<W> {
    pub fn new(out: W, target: impl Into<String>) -> Self {
        Self {
            out,
            target: target.into(),
            smells: smell_names(),
            header_written: false,
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        LEADING_COLUMNS
            .iter()
            .copied()
            .chain(self.smells.iter().copied())
            .collect()
    }

    fn write_line<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>) -> Result<(), OutputError> {
        let line = cells
            .into_iter()
            .map(quote)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.out, "{line}").map_err(|source| OutputError::Write {
            target: self.target.clone(),
            source,
        })
    }

    fn ensure_header(&mut self) -> Result<(), OutputError> {
        if !self.header_written {
            let header = self.header();
            self.write_line(header)?;
            self.header_written = true;
        }
        Ok(())
    }

    pub fn write_report(&mut self, report: &TestFileReport) -> Result<(), OutputError> {
        self.ensure_header()?;
        let names = report.smell_names();
        for row in report.rows() {
            let mut cells: Vec<String> = vec![
                report.file.app.clone(),
                report.test_class.clone(),
                row.test_method.clone(),
                report.file.test_file_path.clone(),
                report.file.production_file_path.clone(),
                report.file.relative_test_file_path.clone(),
                report.file.relative_production_file_path.clone(),
            ];
            for smell in &self.smells {
                let cell = names
                    .iter()
                    .position(|n| n == smell)
                    .map(|i| row.verdicts[i].to_string())
                    .unwrap_or_default();
                cells.push(cell);
            }
            self.write_line(cells.iter().map(String::as_str))?;
        }
        Ok(())
    }

    /// Write the header even when no report was written.
    pub fn finish(mut self) -> Result<W, OutputError> {
        self.ensure_header()?;
        self.out.flush().map_err(|source| OutputError::Write {
            target: self.target.clone(),
            source,
        })?;
        Ok(self.out)
    }
}

/// RFC 4180 field quoting.
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Pretty JSON array of reports, element metrics included.
pub fn write_json<W: Write>(
    mut out: W,
    reports: &[TestFileReport],
    target: &str,
) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut out, reports).map_err(|e| OutputError::Serialize {
        message: e.to_string(),
    })?;
    writeln!(out).map_err(|source| OutputError::Write {
        target: target.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::SmellKind;
    use crate::report::{
        CodeElement, DetectorOutcome, FilePair, NotEvaluatedReason, Outcome, ReportGranularity,
    };

    fn report(granularity: ReportGranularity) -> TestFileReport {
        let mut file = FilePair::new("demo", "/src/demo/test/Foo, BarTest.java", "");
        file.relative_test_file_path = "test/Foo, BarTest.java".into();
        TestFileReport {
            file,
            granularity,
            test_class: "Foo, BarTest.java".into(),
            detectors: vec![
                DetectorOutcome {
                    smell: SmellKind::EmptyTest,
                    outcome: Outcome::Evaluated {
                        has_smell: true,
                        elements: vec![CodeElement::method("testA", true)],
                    },
                },
                DetectorOutcome {
                    smell: SmellKind::EagerTest,
                    outcome: Outcome::NotEvaluated {
                        reason: NotEvaluatedReason::MissingCounterpart,
                    },
                },
            ],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_rows_follow_catalog_columns() {
        let mut writer = CsvReportWriter::new(Vec::new(), "memory");
        writer.write_report(&report(ReportGranularity::Method)).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("App,TestClass,TestMethod,"));
        assert_eq!(lines[0].split(',').count(), LEADING_COLUMNS.len() + 21);

        let expected_prefix = "demo,\"Foo, BarTest.java\",testA,\"/src/demo/test/Foo, BarTest.java\",,\"test/Foo, BarTest.java\",,";
        assert!(lines[1].starts_with(expected_prefix), "{}", lines[1]);
        let smells = &lines[1][expected_prefix.len()..];
        let cells: Vec<&str> = smells.split(',').collect();
        assert_eq!(cells.len(), 21);
        // Empty Test is the fifth smell, Eager Test the fourteenth.
        assert_eq!(cells[4], "true");
        assert_eq!(cells[13], "");
        assert_eq!(cells[0], "");
    }

    #[test]
    fn test_empty_output_still_has_header() {
        let writer = CsvReportWriter::new(Vec::new(), "memory");
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_json_includes_metrics() {
        let mut r = report(ReportGranularity::Class);
        if let Outcome::Evaluated { elements, .. } = &mut r.detectors[0].outcome {
            elements[0] = CodeElement::method("testA", true).with_metric("StatementCount", 0);
        }
        let mut out = Vec::new();
        write_json(&mut out, &[r], "memory").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["test_class"], "Foo, BarTest.java");
        assert_eq!(value[0]["detectors"][0]["smell"], "Empty Test");
        assert_eq!(
            value[0]["detectors"][0]["outcome"]["elements"][0]["metrics"]["StatementCount"],
            "0"
        );
        assert_eq!(
            value[0]["detectors"][1]["outcome"]["reason"],
            "missing_counterpart"
        );
    }
}
