//! Sensitive Equality: an assertion compares the output of `toString()`,
//! so it breaks whenever the formatting changes.

use super::helpers::{is_assertion, per_test_method};
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::Call;

#[derive(Debug, Default)]
pub struct SensitiveEquality {
    elements: Vec<CodeElement>,
}

impl SensitiveEquality {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct ToStringScan {
    /// Nesting depth of assertion calls around the current node.
    in_assertion: usize,
    count: usize,
}

impl Visit for ToStringScan {
    fn visit_call(&mut self, call: &Call) {
        if self.in_assertion > 0 && call.name == "toString" && call.args.is_empty() {
            self.count += 1;
        }
        let assertion = is_assertion(&call.name);
        if assertion {
            self.in_assertion += 1;
        }
        walk_call(self, call);
        if assertion {
            self.in_assertion -= 1;
        }
    }
}

impl Detector for SensitiveEquality {
    fn kind(&self) -> SmellKind {
        SmellKind::SensitiveEquality
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = ToStringScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.count > 0).with_metric("SensitiveCount", scan.count)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
