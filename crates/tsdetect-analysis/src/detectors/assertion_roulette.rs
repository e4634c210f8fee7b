//! Assertion Roulette: several assertions in one test, at least one of
//! them without an explanation message.

use super::helpers::{is_assertion, lacks_message, per_test_method};
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::Call;

#[derive(Debug, Default)]
pub struct AssertionRoulette {
    elements: Vec<CodeElement>,
}

impl AssertionRoulette {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct AssertScan {
    asserts: usize,
    without_message: usize,
}

impl Visit for AssertScan {
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        if is_assertion(&call.name) {
            self.asserts += 1;
            if lacks_message(call) {
                self.without_message += 1;
            }
        }
    }
}

impl Detector for AssertionRoulette {
    fn kind(&self) -> SmellKind {
        SmellKind::AssertionRoulette
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = AssertScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.asserts > 1 && scan.without_message > 0)
                .with_metric("AssertCount", scan.asserts)
                .with_metric("AssertNoMessageCount", scan.without_message)
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
    fn test_flags_unexplained_assertions() {
        let elements = run(
            SmellKind::AssertionRoulette,
            r#"
            class FixtureTest {
                @Test void testBare() { assertEquals(1, a); assertTrue(b); }
                @Test void testExplained() { assertEquals("a", 1, a); assertTrue("b", b); }
                @Test void testSingle() { assertEquals(1, a); }
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testBare"));
        assert!(!flagged(&elements, "testExplained"));
        assert!(!flagged(&elements, "testSingle"));
        assert_eq!(elements[0].metric("AssertNoMessageCount"), Some("2"));
    }
}
