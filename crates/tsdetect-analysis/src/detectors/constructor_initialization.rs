//! Constructor Initialization: the test class sets up state in a
//! constructor instead of a fixture method.

use super::helpers::test_class;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;

#[derive(Debug, Default)]
pub struct ConstructorInitialization {
    elements: Vec<CodeElement>,
}

impl ConstructorInitialization {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Detector for ConstructorInitialization {
    fn kind(&self) -> SmellKind {
        SmellKind::ConstructorInitialization
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = test_class(ctx.test, ctx.test_type_name)
            .map(|class| {
                let count = class.constructors.len();
                CodeElement::class(&class.name, count > 0).with_metric("ConstructorCount", count)
            })
            .into_iter()
            .collect();
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
    fn test_constructor_flags_class() {
        let elements = run(
            SmellKind::ConstructorInitialization,
            "class FixtureTest { private int x; public FixtureTest() { x = 1; } @Test void testA() {} }",
            None,
        );
        assert_eq!(elements.len(), 1);
        assert!(flagged(&elements, "FixtureTest"));
    }

    #[test]
    fn test_fixture_method_is_clean() {
        let elements = run(
            SmellKind::ConstructorInitialization,
            "class FixtureTest { @Before public void setUp() {} @Test void testA() {} }",
            None,
        );
        assert!(!flagged(&elements, "FixtureTest"));
    }
}
