//! Predicates and traversal scaffolding shared by the detectors.

use tsdetect_core::config::DetectionConfig;

use super::AnalysisContext;
use crate::report::CodeElement;
use crate::syntax::visit::{walk_call, walk_local_var, Visit};
use crate::syntax::{Call, CompilationUnit, Expr, LocalVar, MethodDecl, TypeDecl};

/// A test method together with the type that declares it.
#[derive(Debug, Clone, Copy)]
pub struct TestMethod<'a> {
    pub owner: &'a TypeDecl,
    pub method: &'a MethodDecl,
}

impl<'a> TestMethod<'a> {
    pub fn name(&self) -> &'a str {
        &self.method.name
    }
}

/// JUnit 4/5 annotated, or JUnit 3 named (`test*`, any case).
pub fn is_test_method(method: &MethodDecl, config: &DetectionConfig) -> bool {
    has_test_annotation(method, config) || method.name.to_lowercase().starts_with("test")
}

pub fn has_test_annotation(method: &MethodDecl, config: &DetectionConfig) -> bool {
    config
        .effective_test_annotations()
        .iter()
        .any(|a| method.has_annotation(a))
}

/// Every test method of every member type, in source order.
pub fn test_methods<'a>(unit: &'a CompilationUnit, config: &DetectionConfig) -> Vec<TestMethod<'a>> {
    unit.all_types()
        .into_iter()
        .flat_map(|owner| {
            owner
                .methods
                .iter()
                .filter(|m| is_test_method(m, config))
                .map(move |method| TestMethod { owner, method })
        })
        .collect()
}

/// Build one element per test method with `inspect`.
pub fn per_test_method<'a, F>(ctx: &AnalysisContext<'a>, inspect: F) -> Vec<CodeElement>
where
    F: FnMut(TestMethod<'a>) -> CodeElement,
{
    test_methods(ctx.test, ctx.config)
        .into_iter()
        .map(inspect)
        .collect()
}

/// The type named like the test file, else the first top-level type.
pub fn test_class<'a>(unit: &'a CompilationUnit, name: &str) -> Option<&'a TypeDecl> {
    unit.find_type(name).or_else(|| unit.types.first())
}

/// The type named like the production file, else the first top-level
/// production type.
pub fn production_class_name<'a>(ctx: &AnalysisContext<'a>) -> Option<&'a str> {
    let unit = ctx.production?;
    ctx.production_type_name
        .and_then(|name| unit.find_type(name))
        .or_else(|| unit.types.first())
        .map(|ty| ty.name.as_str())
}

pub fn is_assertion(name: &str) -> bool {
    name.starts_with("assert") || name == "fail"
}

/// Equality-style assertions: `(message?, expected, actual)`.
pub fn is_equality_assertion(name: &str) -> bool {
    matches!(
        name,
        "assertEquals"
            | "assertNotEquals"
            | "assertArrayEquals"
            | "assertSame"
            | "assertNotSame"
            | "assertThat"
    )
}

/// Single-condition assertions: `(message?, condition)`.
pub fn is_condition_assertion(name: &str) -> bool {
    matches!(name, "assertTrue" | "assertFalse" | "assertNull" | "assertNotNull")
}

/// Assertion called without its optional explanation message.
pub fn lacks_message(call: &Call) -> bool {
    let name = call.name.as_str();
    if is_equality_assertion(name) {
        call.args.len() == 2
    } else if is_condition_assertion(name) {
        call.args.len() == 1
    } else if name == "fail" {
        call.args.is_empty()
    } else {
        false
    }
}

/// Distinct production method names called from one test method.
///
/// A call counts when its receiver is a bare name equal to the production
/// class (static access) or to a local variable declared with the
/// production class type. Distinctness is by method name only.
#[derive(Debug)]
pub struct ProductionCallScan<'p> {
    production_class: Option<&'p str>,
    variables: Vec<String>,
    pub called: Vec<String>,
}

impl<'p> ProductionCallScan<'p> {
    pub fn new(production_class: Option<&'p str>) -> Self {
        Self {
            production_class,
            variables: Vec::new(),
            called: Vec::new(),
        }
    }

    fn is_production_receiver(&self, receiver: &str) -> bool {
        self.production_class == Some(receiver) || self.variables.iter().any(|v| v == receiver)
    }
}

impl Visit for ProductionCallScan<'_> {
    fn visit_local_var(&mut self, var: &LocalVar) {
        if self.production_class == Some(var.ty.name.as_str()) {
            self.variables
                .extend(var.variables.iter().map(|v| v.name.clone()));
        }
        walk_local_var(self, var);
    }

    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
        let Some(receiver) = call.scope_name() else {
            return;
        };
        if self.is_production_receiver(receiver) && !self.called.contains(&call.name) {
            self.called.push(call.name.clone());
        }
    }
}

/// Unqualified or `this.`-qualified call.
pub fn is_own_call(call: &Call) -> bool {
    match call.scope.as_deref() {
        None => true,
        Some(Expr::This) => true,
        Some(_) => false,
    }
}
