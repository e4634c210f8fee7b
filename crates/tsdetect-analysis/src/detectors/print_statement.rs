//! Print Statement: console output inside a test.

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::{Call, Expr};

const PRINT_METHODS: &[&str] = &["print", "println", "printf", "write"];

#[derive(Debug, Default)]
pub struct PrintStatement {
    elements: Vec<CodeElement>,
}

impl PrintStatement {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `System.out.<print method>(...)`.
fn is_console_print(call: &Call) -> bool {
    if !PRINT_METHODS.contains(&call.name.as_str()) {
        return false;
    }
    match call.scope.as_deref() {
        Some(Expr::FieldAccess { scope, name }) => {
            name == "out" && scope.as_name() == Some("System")
        }
        _ => false,
    }
}

#[derive(Default)]
struct PrintScan {
    count: usize,
}

impl Visit for PrintScan {
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        if is_console_print(call) {
            self.count += 1;
        }
    }
}

impl Detector for PrintStatement {
    fn kind(&self) -> SmellKind {
        SmellKind::PrintStatement
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = PrintScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.count >= 1).with_metric("PrintCount", scan.count)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
