//! Unknown Test: a test with no assertion and no expected exception, so
//! it can only fail by crashing.

use tsdetect_core::config::DetectionConfig;

use super::helpers::{is_assertion, per_test_method};
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::{Call, MethodDecl};

#[derive(Debug, Default)]
pub struct UnknownTest {
    elements: Vec<CodeElement>,
}

impl UnknownTest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `@Test(expected = SomeException.class)`.
fn expects_exception(method: &MethodDecl, config: &DetectionConfig) -> bool {
    config
        .effective_test_annotations()
        .iter()
        .filter_map(|a| method.annotation(a))
        .any(|a| a.arg("expected").is_some())
}

#[derive(Default)]
struct AssertCount {
    count: usize,
}

impl Visit for AssertCount {
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        if is_assertion(&call.name) {
            self.count += 1;
        }
    }
}

impl Detector for UnknownTest {
    fn kind(&self) -> SmellKind {
        SmellKind::UnknownTest
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = AssertCount::default();
            walk_method_body(&mut scan, test.method);
            let unknown = scan.count == 0 && !expects_exception(test.method, ctx.config);
            CodeElement::method(test.name(), unknown).with_metric("AssertCount", scan.count)
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
    fn test_assertion_or_expected_exception() {
        let elements = run(
            SmellKind::UnknownTest,
            r#"
            class FixtureTest {
                @Test void testNoCheck() { calc.add(1, 2); }
                @Test void testChecks() { assertThat(calc.add(1, 2), is(3)); }
                @Test(expected = ArithmeticException.class) void testThrows() { calc.divide(1, 0); }
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testNoCheck"));
        assert!(!flagged(&elements, "testChecks"));
        assert!(!flagged(&elements, "testThrows"));
    }
}
