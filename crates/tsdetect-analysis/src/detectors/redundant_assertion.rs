//! Redundant Assertion: an assertion that holds regardless of the code
//! under test (`assertTrue(true)`, `assertEquals(x, x)`).

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_method_body, Visit};
use crate::syntax::{Call, Expr, Literal};

#[derive(Debug, Default)]
pub struct RedundantAssertion {
    elements: Vec<CodeElement>,
}

impl RedundantAssertion {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_literal(expr: Option<&Expr>, literal: &Literal) -> bool {
    matches!(expr, Some(Expr::Literal(lit)) if lit == literal)
}

fn is_redundant(call: &Call) -> bool {
    let last = call.args.last();
    match call.name.as_str() {
        "assertTrue" => is_literal(last, &Literal::Bool(true)),
        "assertFalse" => is_literal(last, &Literal::Bool(false)),
        "assertNull" => is_literal(last, &Literal::Null),
        "assertEquals" | "assertArrayEquals" | "assertSame" => match call.args.as_slice() {
            [.., expected, actual] => expected == actual,
            _ => false,
        },
        _ => false,
    }
}

#[derive(Default)]
struct RedundancyScan {
    count: usize,
}

impl Visit for RedundancyScan {
    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        if is_redundant(call) {
            self.count += 1;
        }
    }
}

impl Detector for RedundantAssertion {
    fn kind(&self) -> SmellKind {
        SmellKind::RedundantAssertion
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = RedundancyScan::default();
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.count > 0).with_metric("RedundantCount", scan.count)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}
