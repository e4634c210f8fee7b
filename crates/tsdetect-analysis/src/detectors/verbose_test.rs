//! Verbose Test: a test body too long to read at a glance.

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;

#[derive(Debug, Default)]
pub struct VerboseTest {
    elements: Vec<CodeElement>,
}

impl VerboseTest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Detector for VerboseTest {
    fn kind(&self) -> SmellKind {
        SmellKind::VerboseTest
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        // inclusive: exactly `threshold` statements is already verbose
        let threshold = ctx.config.effective_verbose_threshold() as usize;
        self.elements = per_test_method(ctx, |test| {
            let statements = test.method.statements().len();
            CodeElement::method(test.name(), statements >= threshold)
                .with_metric("StatementCount", statements)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use tsdetect_core::config::DetectionConfig;

    use crate::detectors::helpers::fixtures::{flagged, run, run_with};
    use super::*;

    fn body(statements: usize) -> String {
        let lines: String = (0..statements).map(|i| format!("int v{i} = {i};\n")).collect();
        format!("class FixtureTest {{ @Test void testLong() {{ {lines} }} }}")
    }

    #[test]
    fn test_default_threshold() {
        let elements = run(SmellKind::VerboseTest, &body(29), None);
        assert!(!flagged(&elements, "testLong"));
        let elements = run(SmellKind::VerboseTest, &body(30), None);
        assert!(flagged(&elements, "testLong"));
        assert_eq!(elements[0].metric("StatementCount"), Some("30"));
    }

    #[test]
    fn test_configured_threshold() {
        let config = DetectionConfig {
            verbose_threshold: Some(3),
            ..Default::default()
        };
        let elements = run_with(SmellKind::VerboseTest, &body(2), None, &config);
        assert!(!flagged(&elements, "testLong"));
        let elements = run_with(SmellKind::VerboseTest, &body(3), None, &config);
        assert!(flagged(&elements, "testLong"));
        assert_eq!(elements[0].metric("StatementCount"), Some("3"));
    }
}
