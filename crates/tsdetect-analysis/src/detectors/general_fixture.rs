//! General Fixture: the setup method initialises fields that a test never
//! touches, so every test pays for a fixture it only partly needs.

use rustc_hash::{FxHashMap, FxHashSet};
use tsdetect_core::config::DetectionConfig;

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_expr, walk_method_body, Visit};
use crate::syntax::{Expr, MethodDecl, TypeDecl};

#[derive(Debug, Default)]
pub struct GeneralFixture {
    elements: Vec<CodeElement>,
}

impl GeneralFixture {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_setup_method(method: &MethodDecl, config: &DetectionConfig) -> bool {
    method.name == "setUp"
        || config
            .effective_setup_annotations()
            .iter()
            .any(|a| method.has_annotation(a))
}

/// `x` or `this.x`.
fn field_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(name) => Some(name),
        Expr::FieldAccess { scope, name } if matches!(**scope, Expr::This) => Some(name),
        _ => None,
    }
}

/// Fields of the class assigned inside its setup methods.
struct SetupScan<'c> {
    class_fields: FxHashSet<&'c str>,
    initialised: Vec<String>,
}

impl Visit for SetupScan<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Assign { target, .. } = expr {
            if let Some(name) = field_name(target) {
                if self.class_fields.contains(name) && !self.initialised.iter().any(|f| f == name) {
                    self.initialised.push(name.to_string());
                }
            }
        }
        walk_expr(self, expr);
    }
}

/// Every name and `this.` field referenced in a test body.
#[derive(Default)]
struct UsageScan {
    used: FxHashSet<String>,
}

impl Visit for UsageScan {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Some(name) = field_name(expr) {
            self.used.insert(name.to_string());
        }
        walk_expr(self, expr);
    }
}

fn setup_fields(class: &TypeDecl, config: &DetectionConfig) -> Vec<String> {
    let mut scan = SetupScan {
        class_fields: class.field_names().collect(),
        initialised: Vec::new(),
    };
    for method in class.methods.iter().filter(|m| is_setup_method(m, config)) {
        walk_method_body(&mut scan, method);
    }
    scan.initialised
}

impl Detector for GeneralFixture {
    fn kind(&self) -> SmellKind {
        SmellKind::GeneralFixture
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        let mut fixtures: FxHashMap<&str, Vec<String>> = FxHashMap::default();
        self.elements = per_test_method(ctx, |test| {
            let fields = fixtures
                .entry(test.owner.name.as_str())
                .or_insert_with(|| setup_fields(test.owner, ctx.config));
            let mut usage = UsageScan::default();
            walk_method_body(&mut usage, test.method);
            let unused = fields.iter().filter(|f| !usage.used.contains(*f)).count();
            CodeElement::method(test.name(), unused > 0)
                .with_metric("SetupFieldCount", fields.len())
                .with_metric("UnusedSetupFieldCount", unused)
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

    const FIXTURE: &str = r#"
        class FixtureTest {
            private Calculator calc;
            private Database db;
            private int unrelated;

            @Before
            public void init() {
                calc = new Calculator();
                this.db = Database.open();
            }

            @Test void testBoth() { db.clear(); assertEquals(0, calc.total()); }
            @Test void testCalcOnly() { assertEquals(0, calc.total()); }
        }
    "#;

    #[test]
    fn test_partial_fixture_use_is_flagged() {
        let elements = run(SmellKind::GeneralFixture, FIXTURE, None);
        assert!(!flagged(&elements, "testBoth"));
        assert!(flagged(&elements, "testCalcOnly"));
        assert_eq!(elements[1].metric("SetupFieldCount"), Some("2"));
        assert_eq!(elements[1].metric("UnusedSetupFieldCount"), Some("1"));
    }

    #[test]
    fn test_no_setup_method_is_clean() {
        let elements = run(
            SmellKind::GeneralFixture,
            "class FixtureTest { int a; @Test void testA() { a = 1; } }",
            None,
        );
        assert!(!flagged(&elements, "testA"));
    }

    #[test]
    fn test_junit3_setup_by_name() {
        let elements = run(
            SmellKind::GeneralFixture,
            r#"
            class FixtureTest extends TestCase {
                Widget w; Gadget g;
                protected void setUp() { w = new Widget(); g = new Gadget(); }
                public void testWidget() { assertNotNull(w); }
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testWidget"));
    }
}
