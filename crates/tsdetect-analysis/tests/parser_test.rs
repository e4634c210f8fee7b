//! Parser tests against the Java fixtures.

use std::path::{Path, PathBuf};

use tsdetect_analysis::parsers::JavaParser;
use tsdetect_analysis::syntax::{Expr, Stmt, TypeKind};
use tsdetect_core::errors::ParseError;

fn fixture(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(format!("../../test-fixtures/java/{file}"))
}

#[test]
fn test_production_fixture_lowers_members() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parser.parse_file(&fixture("Calculator.java")).unwrap();

    assert_eq!(unit.package.as_deref(), Some("com.example.calc"));
    assert_eq!(unit.types.len(), 1);
    let calc = &unit.types[0];
    assert_eq!(calc.name, "Calculator");
    assert_eq!(calc.kind, TypeKind::Class);
    let methods: Vec<&str> = calc.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        methods,
        vec!["add", "subtract", "divide", "store", "recall", "withMemory"]
    );
    assert_eq!(calc.field_names().collect::<Vec<_>>(), vec!["memory"]);
}

#[test]
fn test_test_fixture_keeps_annotations_and_calls() {
    let mut parser = JavaParser::new().unwrap();
    let unit = parser.parse_file(&fixture("CalculatorTest.java")).unwrap();
    let class = &unit.types[0];

    assert_eq!(unit.imports.len(), 2);
    let divide = class
        .methods
        .iter()
        .find(|m| m.name == "testDivideByZero")
        .unwrap();
    let test = divide.annotation("Test").unwrap();
    assert!(matches!(test.arg("expected"), Some(Expr::ClassLit(t)) if t.name == "ArithmeticException"));

    let print = class
        .methods
        .iter()
        .find(|m| m.name == "testPrintsResult")
        .unwrap();
    let Stmt::Expr(Expr::Call(call)) = &print.statements()[1] else {
        panic!("expected a call statement");
    };
    assert_eq!(call.name, "println");
    assert!(matches!(
        call.scope.as_deref(),
        Some(Expr::FieldAccess { scope, name }) if name == "out" && scope.as_name() == Some("System")
    ));
}

#[test]
fn test_broken_fixture_is_a_syntax_error() {
    let mut parser = JavaParser::new().unwrap();
    let err = parser.parse_file(&fixture("Broken.java")).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { error_count, .. } if error_count > 0));
}

#[test]
fn test_parser_is_reusable_after_failure() {
    let mut parser = JavaParser::new().unwrap();
    assert!(parser.parse_file(&fixture("Broken.java")).is_err());
    assert!(parser.parse_file(&fixture("Calculator.java")).is_ok());
}
