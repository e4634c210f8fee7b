//! Lowering from the tree-sitter concrete tree into `syntax::types`.
//!
//! Node kinds follow the tree-sitter-java grammar. Comments are extras and
//! may appear between any two children, so every child listing goes
//! through `named_children`, which drops them.

use tree_sitter::Node;

use crate::syntax::*;

pub(crate) struct Lowerer<'a> {
    source: &'a [u8],
}

fn is_comment(node: &Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|n| !is_comment(n))
        .collect();
    children
}

fn all_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node.children(&mut cursor).collect();
    children
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .children_by_field_name(field, &mut cursor)
        .filter(|n| !is_comment(n))
        .collect();
    children
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(source: &'a [u8]) -> Self {
        Self { source }
    }

    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    fn field_text(&self, node: Node, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n))
            .unwrap_or_default()
    }

    pub(crate) fn compilation_unit(&self, root: Node) -> CompilationUnit {
        let mut unit = CompilationUnit::default();
        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    unit.package = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
                        .map(|n| self.text(n));
                }
                "import_declaration" => {
                    let path = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
                        .map(|n| self.text(n));
                    if let Some(path) = path {
                        unit.imports.push(path);
                    }
                }
                _ => {
                    if let Some(ty) = self.type_decl(child) {
                        unit.types.push(ty);
                    }
                }
            }
        }
        unit
    }

    // ---- Declarations ----

    fn type_decl(&self, node: Node) -> Option<TypeDecl> {
        let kind = match node.kind() {
            "class_declaration" => TypeKind::Class,
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => return None,
        };
        let (annotations, modifiers) = self.modifiers(node);
        let mut ty = TypeDecl {
            name: self.field_text(node, "name"),
            kind,
            annotations,
            modifiers,
            superclass: node
                .child_by_field_name("superclass")
                .and_then(|s| named_children(s).into_iter().next())
                .map(|t| self.type_ref(t)),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            initializers: Vec::new(),
            types: Vec::new(),
        };
        if let Some(body) = node.child_by_field_name("body") {
            self.type_body(body, &mut ty);
        }
        Some(ty)
    }

    fn type_body(&self, body: Node, ty: &mut TypeDecl) {
        for member in named_children(body) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => ty.fields.push(self.field_decl(member)),
                "method_declaration" => ty.methods.push(self.method_decl(member, false)),
                "constructor_declaration" | "compact_constructor_declaration" => {
                    ty.constructors.push(self.method_decl(member, true))
                }
                "block" => ty.initializers.push(self.block(member)),
                "static_initializer" => {
                    if let Some(block) = named_children(member).into_iter().find(|n| n.kind() == "block") {
                        ty.initializers.push(self.block(block));
                    }
                }
                // enum bodies nest their members one level deeper
                "enum_body_declarations" => self.type_body(member, ty),
                _ => {
                    if let Some(nested) = self.type_decl(member) {
                        ty.types.push(nested);
                    }
                }
            }
        }
    }

    /// Annotations and keyword modifiers of a declaration.
    fn modifiers(&self, decl: Node) -> (Vec<Annotation>, Modifiers) {
        let mut annotations = Vec::new();
        let mut keywords = Modifiers::new();
        let Some(mods) = named_children(decl).into_iter().find(|n| n.kind() == "modifiers") else {
            return (annotations, keywords);
        };
        for child in all_children(mods) {
            match child.kind() {
                "marker_annotation" | "annotation" => annotations.push(self.annotation(child)),
                _ if !child.is_named() => keywords.push(child.kind().to_string()),
                _ => {}
            }
        }
        (annotations, keywords)
    }

    fn annotation(&self, node: Node) -> Annotation {
        let full = self.field_text(node, "name");
        let name = full.rsplit('.').next().unwrap_or(&full).to_string();
        let mut args = Vec::new();
        if let Some(list) = node.child_by_field_name("arguments") {
            for arg in named_children(list) {
                if arg.kind() == "element_value_pair" {
                    args.push(AnnotationArg {
                        key: Some(self.field_text(arg, "key")),
                        value: arg
                            .child_by_field_name("value")
                            .map(|v| self.expr(v))
                            .unwrap_or(Expr::Other(Vec::new())),
                    });
                } else {
                    args.push(AnnotationArg {
                        key: None,
                        value: self.expr(arg),
                    });
                }
            }
        }
        Annotation { name, args }
    }

    fn field_decl(&self, node: Node) -> FieldDecl {
        let (annotations, modifiers) = self.modifiers(node);
        FieldDecl {
            ty: self.field_type(node),
            annotations,
            modifiers,
            variables: self.declarators(node),
        }
    }

    fn field_type(&self, node: Node) -> TypeRef {
        node.child_by_field_name("type")
            .map(|t| self.type_ref(t))
            .unwrap_or_else(|| TypeRef::from_text("var"))
    }

    fn declarators(&self, node: Node) -> Vec<VarDeclarator> {
        field_children(node, "declarator")
            .into_iter()
            .map(|d| VarDeclarator {
                name: self.field_text(d, "name"),
                init: d.child_by_field_name("value").map(|v| self.expr(v)),
            })
            .collect()
    }

    fn method_decl(&self, node: Node, is_constructor: bool) -> MethodDecl {
        let (annotations, modifiers) = self.modifiers(node);
        let params = node
            .child_by_field_name("parameters")
            .map(|p| {
                named_children(p)
                    .into_iter()
                    .filter(|n| matches!(n.kind(), "formal_parameter" | "spread_parameter"))
                    .map(|n| self.param(n))
                    .collect()
            })
            .unwrap_or_default();
        let throws = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "throws")
            .map(|t| named_children(t).into_iter().map(|n| self.type_ref(n)).collect())
            .unwrap_or_default();
        MethodDecl {
            name: self.field_text(node, "name"),
            annotations,
            modifiers,
            params,
            throws,
            body: node.child_by_field_name("body").map(|b| self.block(b)),
            is_constructor,
        }
    }

    fn param(&self, node: Node) -> Param {
        let ty = named_children(node)
            .into_iter()
            .find(|n| n.kind() != "modifiers" && n.kind() != "variable_declarator")
            .map(|t| self.type_ref(t))
            .unwrap_or_else(|| TypeRef::from_text("var"));
        let name = match node.child_by_field_name("name") {
            Some(n) => self.text(n),
            // spread parameters keep the name inside a declarator
            None => named_children(node)
                .into_iter()
                .find(|n| n.kind() == "variable_declarator")
                .map(|d| self.field_text(d, "name"))
                .unwrap_or_default(),
        };
        Param { ty, name }
    }

    fn type_ref(&self, node: Node) -> TypeRef {
        TypeRef::from_text(&self.text(node))
    }

    // ---- Statements ----

    /// `block` and `constructor_body` nodes.
    fn block(&self, node: Node) -> Block {
        Block {
            stmts: named_children(node)
                .into_iter()
                .filter_map(|s| self.stmt(s))
                .collect(),
        }
    }

    fn boxed_stmt(&self, node: Option<Node>) -> Box<Stmt> {
        Box::new(
            node.and_then(|n| self.stmt(n))
                .unwrap_or(Stmt::Block(Block::default())),
        )
    }

    fn stmt(&self, node: Node) -> Option<Stmt> {
        let stmt = match node.kind() {
            "block" => Stmt::Block(self.block(node)),
            "local_variable_declaration" => Stmt::LocalVar(self.local_var(node)),
            "expression_statement" => {
                let inner = named_children(node).into_iter().next()?;
                match inner.kind() {
                    "switch_expression" => Stmt::Switch(self.switch(inner)),
                    _ => Stmt::Expr(self.expr(inner)),
                }
            }
            "if_statement" => Stmt::If {
                cond: self.field_expr(node, "condition"),
                then: self.boxed_stmt(node.child_by_field_name("consequence")),
                otherwise: node
                    .child_by_field_name("alternative")
                    .and_then(|n| self.stmt(n))
                    .map(Box::new),
            },
            "while_statement" => Stmt::While {
                cond: self.field_expr(node, "condition"),
                body: self.boxed_stmt(node.child_by_field_name("body")),
            },
            "do_statement" => Stmt::DoWhile {
                body: self.boxed_stmt(node.child_by_field_name("body")),
                cond: self.field_expr(node, "condition"),
            },
            "for_statement" => Stmt::For {
                init: field_children(node, "init")
                    .into_iter()
                    .map(|n| match n.kind() {
                        "local_variable_declaration" => Stmt::LocalVar(self.local_var(n)),
                        _ => Stmt::Expr(self.expr(n)),
                    })
                    .collect(),
                cond: node.child_by_field_name("condition").map(|n| self.expr(n)),
                update: field_children(node, "update")
                    .into_iter()
                    .map(|n| self.expr(n))
                    .collect(),
                body: self.boxed_stmt(node.child_by_field_name("body")),
            },
            "enhanced_for_statement" => Stmt::ForEach {
                var: LocalVar {
                    ty: self.field_type(node),
                    variables: vec![VarDeclarator {
                        name: self.field_text(node, "name"),
                        init: None,
                    }],
                },
                iterable: self.field_expr(node, "value"),
                body: self.boxed_stmt(node.child_by_field_name("body")),
            },
            "switch_expression" => Stmt::Switch(self.switch(node)),
            "try_statement" | "try_with_resources_statement" => Stmt::Try(self.try_stmt(node)),
            "throw_statement" => Stmt::Throw(self.first_expr(node)),
            "return_statement" => {
                Stmt::Return(named_children(node).into_iter().next().map(|n| self.expr(n)))
            }
            "yield_statement" => Stmt::Yield(self.first_expr(node)),
            "labeled_statement" => {
                let children = named_children(node);
                Stmt::Labeled {
                    label: children.first().map(|n| self.text(*n)).unwrap_or_default(),
                    body: self.boxed_stmt(children.get(1).copied()),
                }
            }
            "synchronized_statement" => Stmt::Synchronized {
                lock: self.first_expr(node),
                body: node
                    .child_by_field_name("body")
                    .map(|b| self.block(b))
                    .unwrap_or_default(),
            },
            "assert_statement" => {
                let children = named_children(node);
                Stmt::Assert {
                    cond: children
                        .first()
                        .map(|n| self.expr(*n))
                        .unwrap_or(Expr::Other(Vec::new())),
                    message: children.get(1).map(|n| self.expr(*n)),
                }
            }
            "break_statement" => Stmt::Break,
            "continue_statement" => Stmt::Continue,
            "explicit_constructor_invocation" => Stmt::Expr(Expr::Call(Call {
                scope: node
                    .child_by_field_name("object")
                    .map(|o| Box::new(self.expr(o))),
                name: self.field_text(node, "constructor"),
                args: self.arguments(node),
            })),
            "class_declaration" | "interface_declaration" | "enum_declaration"
            | "record_declaration" => Stmt::LocalClass(Box::new(self.type_decl(node)?)),
            _ => Stmt::Expr(Expr::Other(
                named_children(node).into_iter().map(|n| self.expr(n)).collect(),
            )),
        };
        Some(stmt)
    }

    fn local_var(&self, node: Node) -> LocalVar {
        LocalVar {
            ty: self.field_type(node),
            variables: self.declarators(node),
        }
    }

    fn switch(&self, node: Node) -> Switch {
        let mut cases = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for group in named_children(body) {
                let mut case = SwitchCase {
                    labels: Vec::new(),
                    body: Vec::new(),
                };
                for child in named_children(group) {
                    if child.kind() == "switch_label" {
                        case.labels
                            .extend(named_children(child).into_iter().map(|n| self.expr(n)));
                    } else if let Some(stmt) = self.stmt(child) {
                        case.body.push(stmt);
                    } else {
                        case.body.push(Stmt::Expr(self.expr(child)));
                    }
                }
                cases.push(case);
            }
        }
        Switch {
            selector: Box::new(self.field_expr(node, "condition")),
            cases,
        }
    }

    fn try_stmt(&self, node: Node) -> Try {
        let mut resources = Vec::new();
        if let Some(list) = node.child_by_field_name("resources") {
            for resource in named_children(list) {
                if resource.child_by_field_name("type").is_some() {
                    resources.push(Stmt::LocalVar(LocalVar {
                        ty: self.field_type(resource),
                        variables: vec![VarDeclarator {
                            name: self.field_text(resource, "name"),
                            init: resource.child_by_field_name("value").map(|v| self.expr(v)),
                        }],
                    }));
                } else {
                    resources.push(Stmt::Expr(self.first_expr(resource)));
                }
            }
        }

        let mut catches = Vec::new();
        let mut finally = None;
        for child in named_children(node) {
            match child.kind() {
                "catch_clause" => catches.push(self.catch_clause(child)),
                "finally_clause" => {
                    finally = named_children(child)
                        .into_iter()
                        .find(|n| n.kind() == "block")
                        .map(|b| self.block(b));
                }
                _ => {}
            }
        }

        Try {
            resources,
            block: node
                .child_by_field_name("body")
                .map(|b| self.block(b))
                .unwrap_or_default(),
            catches,
            finally,
        }
    }

    fn catch_clause(&self, node: Node) -> CatchClause {
        let param = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "catch_formal_parameter");
        let (types, name) = match param {
            Some(p) => {
                let types = named_children(p)
                    .into_iter()
                    .find(|n| n.kind() == "catch_type")
                    .map(|ct| named_children(ct).into_iter().map(|t| self.type_ref(t)).collect())
                    .unwrap_or_default();
                (types, self.field_text(p, "name"))
            }
            None => (Vec::new(), String::new()),
        };
        CatchClause {
            types,
            name,
            body: node
                .child_by_field_name("body")
                .map(|b| self.block(b))
                .unwrap_or_default(),
        }
    }

    // ---- Expressions ----

    fn field_expr(&self, node: Node, field: &str) -> Expr {
        node.child_by_field_name(field)
            .map(|n| self.expr(n))
            .unwrap_or(Expr::Other(Vec::new()))
    }

    fn first_expr(&self, node: Node) -> Expr {
        named_children(node)
            .into_iter()
            .next()
            .map(|n| self.expr(n))
            .unwrap_or(Expr::Other(Vec::new()))
    }

    fn boxed_field(&self, node: Node, field: &str) -> Box<Expr> {
        Box::new(self.field_expr(node, field))
    }

    fn arguments(&self, node: Node) -> Vec<Expr> {
        node.child_by_field_name("arguments")
            .map(|list| named_children(list).into_iter().map(|a| self.expr(a)).collect())
            .unwrap_or_default()
    }

    fn operator(&self, node: Node) -> String {
        match node.child_by_field_name("operator") {
            Some(op) => self.text(op),
            None => all_children(node)
                .into_iter()
                .find(|c| !c.is_named())
                .map(|c| c.kind().to_string())
                .unwrap_or_default(),
        }
    }

    pub(crate) fn expr(&self, node: Node) -> Expr {
        match node.kind() {
            "identifier" | "type_identifier" => Expr::Name(self.text(node)),
            "scoped_identifier" => self.scoped_name(&self.text(node)),
            "this" => Expr::This,
            "super" => Expr::Super,
            "parenthesized_expression" => self.first_expr(node),
            "field_access" => Expr::FieldAccess {
                scope: self.boxed_field(node, "object"),
                name: self.field_text(node, "field"),
            },
            "method_invocation" => Expr::Call(Call {
                scope: node
                    .child_by_field_name("object")
                    .map(|o| Box::new(self.expr(o))),
                name: self.field_text(node, "name"),
                args: self.arguments(node),
            }),
            "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
            | "binary_integer_literal" => Expr::Literal(Literal::Int(self.text(node))),
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                Expr::Literal(Literal::Float(self.text(node)))
            }
            "string_literal" | "text_block" => Expr::Literal(Literal::Str(self.text(node))),
            "character_literal" => Expr::Literal(Literal::Char(self.text(node))),
            "true" => Expr::Literal(Literal::Bool(true)),
            "false" => Expr::Literal(Literal::Bool(false)),
            "null_literal" => Expr::Literal(Literal::Null),
            "object_creation_expression" => Expr::New {
                ty: self.field_type(node),
                args: self.arguments(node),
                body: named_children(node)
                    .into_iter()
                    .find(|n| n.kind() == "class_body")
                    .map(|b| {
                        named_children(b)
                            .into_iter()
                            .filter(|m| m.kind() == "method_declaration")
                            .map(|m| self.method_decl(m, false))
                            .collect()
                    }),
            },
            "assignment_expression" => Expr::Assign {
                target: self.boxed_field(node, "left"),
                op: self.operator(node),
                value: self.boxed_field(node, "right"),
            },
            "binary_expression" => Expr::Binary {
                op: self.operator(node),
                lhs: self.boxed_field(node, "left"),
                rhs: self.boxed_field(node, "right"),
            },
            "unary_expression" => Expr::Unary {
                op: self.operator(node),
                operand: self.boxed_field(node, "operand"),
            },
            "update_expression" => Expr::Unary {
                op: self.operator(node),
                operand: Box::new(self.first_expr(node)),
            },
            "cast_expression" => Expr::Cast {
                ty: self.field_type(node),
                expr: self.boxed_field(node, "value"),
            },
            "ternary_expression" => Expr::Conditional {
                cond: self.boxed_field(node, "condition"),
                then: self.boxed_field(node, "consequence"),
                otherwise: self.boxed_field(node, "alternative"),
            },
            "instanceof_expression" => Expr::InstanceOf {
                expr: self.boxed_field(node, "left"),
                ty: node
                    .child_by_field_name("right")
                    .or_else(|| node.child_by_field_name("pattern"))
                    .map(|t| self.type_ref(t)),
            },
            "array_access" => Expr::ArrayAccess {
                array: self.boxed_field(node, "array"),
                index: self.boxed_field(node, "index"),
            },
            "array_creation_expression" => Expr::ArrayCreation {
                ty: self.field_type(node),
                dims: field_children(node, "dimensions")
                    .into_iter()
                    .filter(|d| d.kind() == "dimensions_expr")
                    .map(|d| self.first_expr(d))
                    .collect(),
                init: node
                    .child_by_field_name("value")
                    .map(|v| named_children(v).into_iter().map(|e| self.expr(e)).collect()),
            },
            "array_initializer" | "element_value_array_initializer" => {
                Expr::ArrayInit(named_children(node).into_iter().map(|e| self.expr(e)).collect())
            }
            "lambda_expression" => {
                let params = node
                    .child_by_field_name("parameters")
                    .map(|p| match p.kind() {
                        "identifier" => vec![self.text(p)],
                        _ => named_children(p)
                            .into_iter()
                            .map(|n| match n.child_by_field_name("name") {
                                Some(name) => self.text(name),
                                None => self.text(n),
                            })
                            .collect(),
                    })
                    .unwrap_or_default();
                let body = match node.child_by_field_name("body") {
                    Some(b) if b.kind() == "block" => LambdaBody::Block(self.block(b)),
                    Some(b) => LambdaBody::Expr(Box::new(self.expr(b))),
                    None => LambdaBody::Block(Block::default()),
                };
                Expr::Lambda { params, body }
            }
            "method_reference" => {
                let children = all_children(node);
                let scope = children
                    .iter()
                    .find(|c| c.is_named() && !is_comment(c))
                    .map(|c| self.expr(*c))
                    .unwrap_or(Expr::Other(Vec::new()));
                let name = children
                    .last()
                    .map(|c| if c.is_named() { self.text(*c) } else { c.kind().to_string() })
                    .unwrap_or_default();
                Expr::MethodRef {
                    scope: Box::new(scope),
                    name,
                }
            }
            "class_literal" => Expr::ClassLit(
                named_children(node)
                    .into_iter()
                    .next()
                    .map(|t| self.type_ref(t))
                    .unwrap_or_else(|| TypeRef::from_text("?")),
            ),
            "switch_expression" => Expr::Switch(self.switch(node)),
            "marker_annotation" | "annotation" => {
                let annotation = self.annotation(node);
                Expr::Other(annotation.args.into_iter().map(|a| a.value).collect())
            }
            _ => Expr::Other(named_children(node).into_iter().map(|n| self.expr(n)).collect()),
        }
    }

    /// `a.b.C` -> nested field accesses rooted at a name.
    fn scoped_name(&self, text: &str) -> Expr {
        let mut parts = text.split('.').map(str::trim);
        let first = parts.next().unwrap_or_default();
        parts.fold(Expr::Name(first.to_string()), |scope, name| Expr::FieldAccess {
            scope: Box::new(scope),
            name: name.to_string(),
        })
    }
}
