//! Conditional Test Logic: control flow inside a test method.

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_expr, walk_method_body, walk_stmt, Visit};
use crate::syntax::{Expr, Stmt};

#[derive(Debug, Default)]
pub struct ConditionalTestLogic {
    elements: Vec<CodeElement>,
}

impl ConditionalTestLogic {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct BranchScan {
    conditions: usize,
    ifs: usize,
    switches: usize,
    fors: usize,
    foreachs: usize,
    whiles: usize,
}

impl BranchScan {
    fn total(&self) -> usize {
        self.conditions + self.ifs + self.switches + self.fors + self.foreachs + self.whiles
    }
}

impl Visit for BranchScan {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::If { .. } => self.ifs += 1,
            Stmt::Switch(_) => self.switches += 1,
            Stmt::For { .. } => self.fors += 1,
            Stmt::ForEach { .. } => self.foreachs += 1,
            Stmt::While { .. } | Stmt::DoWhile { .. } => self.whiles += 1,
            _ => {}
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Conditional { .. } => self.conditions += 1,
            Expr::Switch(_) => self.switches += 1,
            _ => {}
        }
        walk_expr(self, expr);
    }
}

impl Detector for ConditionalTestLogic {
    fn kind(&self) -> SmellKind {
        SmellKind::ConditionalTestLogic
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = BranchScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.total() > 0)
                .with_metric("ConditionCount", scan.conditions)
                .with_metric("IfCount", scan.ifs)
                .with_metric("SwitchCount", scan.switches)
                .with_metric("ForCount", scan.fors)
                .with_metric("ForeachCount", scan.foreachs)
                .with_metric("WhileCount", scan.whiles)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
