//! Ignored Test: a test that exists but never runs.

use tsdetect_core::config::DetectionConfig;

use super::helpers::{has_test_annotation, per_test_method, TestMethod};
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;

#[derive(Debug, Default)]
pub struct IgnoredTest {
    elements: Vec<CodeElement>,
}

impl IgnoredTest {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_ignored(test: &TestMethod<'_>, config: &DetectionConfig) -> bool {
    let ignore = config.effective_ignore_annotations();
    let annotated = ignore
        .iter()
        .any(|a| test.method.has_annotation(a) || test.owner.has_annotation(a));
    // A JUnit 3 runner only picks up public `test*` methods.
    let hidden_junit3 = !has_test_annotation(test.method, config)
        && test.method.name.starts_with("test")
        && !test.method.has_modifier("public");
    annotated || hidden_junit3
}

impl Detector for IgnoredTest {
    fn kind(&self) -> SmellKind {
        SmellKind::IgnoredTest
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            CodeElement::method(test.name(), is_ignored(&test, ctx.config))
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
    use crate::detectors::helpers::fixtures::{flagged, run};
    use super::*;

    #[test]
    fn test_ignore_annotations() {
        let elements = run(
            SmellKind::IgnoredTest,
            r#"
            class FixtureTest {
                @Ignore("flaky") @Test public void testSkipped() {}
                @Disabled @Test void testDisabled() {}
                @Test void testRuns() {}
                void testHiddenJunit3() {}
                public void testVisibleJunit3() {}
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testSkipped"));
        assert!(flagged(&elements, "testDisabled"));
        assert!(!flagged(&elements, "testRuns"));
        assert!(flagged(&elements, "testHiddenJunit3"));
        assert!(!flagged(&elements, "testVisibleJunit3"));
    }

    #[test]
    fn test_ignored_class_flags_every_method() {
        let elements = run(
            SmellKind::IgnoredTest,
            "@Ignore class FixtureTest { @Test void testA() {} @Test void testB() {} }",
            None,
        );
        assert!(elements.iter().all(|e| e.has_smell));
    }
}
