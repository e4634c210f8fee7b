//! Java parser using native tree-sitter.

use std::path::Path;
use std::time::Instant;

use tree_sitter::Parser;
use tsdetect_core::errors::ParseError;

use super::errors::{count_errors, max_depth, MAX_NESTING_DEPTH};
use super::lower::Lowerer;
use crate::syntax::CompilationUnit;

/// Java parser. Holds one tree-sitter parser; not shared across threads.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| ParseError::GrammarLoad {
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Read and parse a Java file.
    pub fn parse_file(&mut self, path: &Path) -> Result<CompilationUnit, ParseError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ParseError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => ParseError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        let source = String::from_utf8_lossy(&bytes);
        self.parse_source(&source, path)
    }

    /// Parse Java source text. `origin` only labels errors.
    pub fn parse_source(
        &mut self,
        source: &str,
        origin: &Path,
    ) -> Result<CompilationUnit, ParseError> {
        let start = Instant::now();

        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::TreeSitter {
                path: origin.to_path_buf(),
            })?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(ParseError::Syntax {
                path: origin.to_path_buf(),
                error_count: count_errors(root).max(1),
            });
        }

        let depth = max_depth(root);
        if depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                path: origin.to_path_buf(),
                depth,
                limit: MAX_NESTING_DEPTH,
            });
        }

        let unit = Lowerer::new(source.as_bytes()).compilation_unit(root);

        tracing::trace!(
            path = %origin.display(),
            types = unit.types.len(),
            parse_time_us = start.elapsed().as_micros() as u64,
            "parsed java source"
        );
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Expr, Stmt};

    fn parse(source: &str) -> CompilationUnit {
        let mut parser = JavaParser::new().unwrap();
        parser.parse_source(source, Path::new("Inline.java")).unwrap()
    }

    #[test]
    fn test_parse_class() {
        let unit = parse("package a.b; public class UserServiceTest extends BaseTest { }");
        assert_eq!(unit.package.as_deref(), Some("a.b"));
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.types[0].name, "UserServiceTest");
        assert_eq!(
            unit.types[0].superclass.as_ref().map(|t| t.name.as_str()),
            Some("BaseTest")
        );
    }

    #[test]
    fn test_parse_method_with_annotations() {
        let unit = parse(
            "class T { @org.junit.Test(expected = IllegalStateException.class) public void check() throws Exception { } }",
        );
        let method = &unit.types[0].methods[0];
        assert_eq!(method.name, "check");
        assert!(method.has_annotation("Test"));
        assert!(method.has_modifier("public"));
        assert!(method.annotation("Test").and_then(|a| a.arg("expected")).is_some());
        assert_eq!(method.throws[0].name, "Exception");
        assert!(method.statements().is_empty());
    }

    #[test]
    fn test_system_out_chain_shape() {
        let unit = parse("class T { void m() { System.out.println(\"x\"); } }");
        let stmt = &unit.types[0].methods[0].statements()[0];
        let Stmt::Expr(Expr::Call(call)) = stmt else {
            panic!("expected call statement, got {stmt:?}");
        };
        assert_eq!(call.name, "println");
        match call.scope.as_deref() {
            Some(Expr::FieldAccess { scope, name }) => {
                assert_eq!(name, "out");
                assert_eq!(scope.as_name(), Some("System"));
            }
            other => panic!("unexpected scope {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_not_statements() {
        let unit = parse("class T { void m() { // nothing\n /* here */ } }");
        assert!(unit.types[0].methods[0].statements().is_empty());
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let mut parser = JavaParser::new().unwrap();
        let err = parser
            .parse_source("class T { void m( { }", Path::new("Broken.java"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_overly_nested_source_is_rejected() {
        let terms = vec!["\"a\""; 2000].join(" + ");
        let source = format!("class DeepTest {{ @Test public void testDeep() {{ String s = {terms}; }} }}");
        let mut parser = JavaParser::new().unwrap();
        let err = parser
            .parse_source(&source, Path::new("DeepTest.java"))
            .unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { depth, .. } if depth > 2000));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let mut parser = JavaParser::new().unwrap();
        let err = parser
            .parse_file(Path::new("/definitely/not/here/FooTest.java"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
