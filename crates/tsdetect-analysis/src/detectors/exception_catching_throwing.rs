//! Exception Catching Throwing: the test decides pass/fail by catching or
//! throwing exceptions itself. A `throws` clause alone does not count.

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_catch_clause, walk_method_body, walk_stmt, Visit};
use crate::syntax::{CatchClause, Stmt};

#[derive(Debug, Default)]
pub struct ExceptionCatchingThrowing {
    elements: Vec<CodeElement>,
}

impl ExceptionCatchingThrowing {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct ExceptionScan {
    count: usize,
}

impl Visit for ExceptionScan {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if matches!(stmt, Stmt::Throw(_)) {
            self.count += 1;
        }
        walk_stmt(self, stmt);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) {
        self.count += 1;
        walk_catch_clause(self, clause);
    }
}

impl Detector for ExceptionCatchingThrowing {
    fn kind(&self) -> SmellKind {
        SmellKind::ExceptionCatchingThrowing
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = ExceptionScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.count > 0).with_metric("ExceptionCount", scan.count)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
