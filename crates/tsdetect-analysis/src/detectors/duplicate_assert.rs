//! Duplicate Assert: the same check is asserted twice in one test.

use rustc_hash::FxHashSet;

use super::helpers::{is_assertion, per_test_method};
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::{Call, Expr};

#[derive(Debug, Default)]
pub struct DuplicateAssert {
    elements: Vec<CodeElement>,
}

impl DuplicateAssert {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct DuplicateScan {
    seen: FxHashSet<Vec<Expr>>,
    duplicates: usize,
}

impl Visit for DuplicateScan {
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        // `fail()` takes no arguments; repeating it says nothing.
        if is_assertion(&call.name) && !call.args.is_empty() && !self.seen.insert(call.args.clone())
        {
            self.duplicates += 1;
        }
    }
}

impl Detector for DuplicateAssert {
    fn kind(&self) -> SmellKind {
        SmellKind::DuplicateAssert
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = DuplicateScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.duplicates > 0)
                .with_metric("DuplicateCount", scan.duplicates)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
