//! Resource Optimism: the test uses a file without first checking that it
//! exists.

use rustc_hash::FxHashSet;

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_expr, walk_local_var, walk_method_body, Visit};
use crate::syntax::{Call, Expr, LocalVar, TypeDecl};

const FILE_TYPE: &str = "File";
const EXISTENCE_CHECKS: &[&str] = &["exists", "isFile", "notExists"];

#[derive(Debug, Default)]
pub struct ResourceOptimism {
    elements: Vec<CodeElement>,
}

impl ResourceOptimism {
    pub fn new() -> Self {
        Self::default()
    }
}

fn file_fields(class: &TypeDecl) -> FxHashSet<&str> {
    class
        .fields
        .iter()
        .filter(|f| f.ty.name == FILE_TYPE)
        .flat_map(|f| f.variables.iter().map(|v| v.name.as_str()))
        .collect()
}

struct FileScan<'c> {
    fields: &'c FxHashSet<&'c str>,
    used_fields: FxHashSet<String>,
    locals: usize,
    created: usize,
    checked: bool,
}

impl FileScan<'_> {
    fn file_count(&self) -> usize {
        self.locals + self.created + self.used_fields.len()
    }
}

impl Visit for FileScan<'_> {
    fn visit_local_var(&mut self, var: &LocalVar) {
        if var.ty.name == FILE_TYPE {
            self.locals += var.variables.len();
        }
        walk_local_var(self, var);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::New { ty, .. } if ty.name == FILE_TYPE => self.created += 1,
            Expr::Name(name) if self.fields.contains(name.as_str()) => {
                self.used_fields.insert(name.clone());
            }
            Expr::FieldAccess { scope, name }
                if matches!(**scope, Expr::This) && self.fields.contains(name.as_str()) =>
            {
                self.used_fields.insert(name.clone());
            }
            _ => {}
        }
        walk_expr(self, expr);
    }

    fn visit_call(&mut self, call: &Call) {
        if EXISTENCE_CHECKS.contains(&call.name.as_str()) {
            self.checked = true;
        }
        walk_call(self, call);
    }
}

impl Detector for ResourceOptimism {
    fn kind(&self) -> SmellKind {
        SmellKind::ResourceOptimism
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let fields = file_fields(test.owner);
            let mut scan = FileScan {
                fields: &fields,
                used_fields: FxHashSet::default(),
                locals: 0,
                created: 0,
                checked: false,
            };
            walk_method_body(&mut scan, test.method);
            let files = scan.file_count();
            CodeElement::method(test.name(), files > 0 && !scan.checked)
                .with_metric("FileCount", files)
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
    fn test_unchecked_file_use() {
        let elements = run(
            SmellKind::ResourceOptimism,
            r#"
            class FixtureTest {
                private File config;

                @Test void testOptimistic() { File f = new File("a.txt"); read(f); }
                @Test void testChecked() { File f = new File("a.txt"); assertTrue(f.exists()); read(f); }
                @Test void testField() { read(this.config); }
                @Test void testNoFiles() { assertEquals(1, 1); }
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testOptimistic"));
        assert_eq!(elements[0].metric("FileCount"), Some("2"));
        assert!(!flagged(&elements, "testChecked"));
        assert!(flagged(&elements, "testField"));
        assert!(!flagged(&elements, "testNoFiles"));
    }
}
