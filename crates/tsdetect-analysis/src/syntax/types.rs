//! Syntax node types.

use serde::Serialize;
use smallvec::SmallVec;

/// A parsed Java source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    /// Every type declaration, member types included, in source pre-order.
    /// Local and anonymous classes are not members and are not listed.
    pub fn all_types(&self) -> Vec<&TypeDecl> {
        let mut out = Vec::new();
        for ty in &self.types {
            collect_types(ty, &mut out);
        }
        out
    }

    /// Top-level type with the given name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }
}

fn collect_types<'a>(ty: &'a TypeDecl, out: &mut Vec<&'a TypeDecl>) {
    out.push(ty);
    for nested in &ty.types {
        collect_types(nested, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// Keyword modifiers (`public`, `static`, ...).
pub type Modifiers = SmallVec<[String; 2]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    pub superclass: Option<TypeRef>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<MethodDecl>,
    pub initializers: Vec<Block>,
    pub types: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }

    /// Names of all fields declared directly on this type.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .flat_map(|f| f.variables.iter().map(|v| v.name.as_str()))
    }
}

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    /// Simple name without package, type arguments or array brackets.
    pub name: String,
    /// Full source text with whitespace removed.
    pub text: String,
}

impl TypeRef {
    pub fn from_text(raw: &str) -> Self {
        let text: String = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            name: base_type_name(&text),
            text: text.replace(' ', ""),
        }
    }
}

/// `java.util.List<String>[]` -> `List`.
fn base_type_name(text: &str) -> String {
    let head = text.split(['<', '[']).next().unwrap_or(text).trim();
    let head = head.rsplit(' ').next().unwrap_or(head);
    head.rsplit('.').next().unwrap_or(head).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Annotation {
    /// Simple name (`org.junit.Test` -> `Test`).
    pub name: String,
    pub args: Vec<AnnotationArg>,
}

impl Annotation {
    /// Value of a named argument (`@Test(expected = Foo.class)`).
    pub fn arg(&self, key: &str) -> Option<&Expr> {
        self.args
            .iter()
            .find(|a| a.key.as_deref() == Some(key))
            .map(|a| &a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnnotationArg {
    pub key: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDecl {
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    pub variables: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    pub params: Vec<Param>,
    pub throws: Vec<TypeRef>,
    /// `None` for abstract and interface methods.
    pub body: Option<Block>,
    pub is_constructor: bool,
}

impl MethodDecl {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    pub fn statements(&self) -> &[Stmt] {
        self.body.as_ref().map(|b| b.stmts.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalVar {
    pub ty: TypeRef,
    pub variables: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Stmt {
    LocalVar(LocalVar),
    Expr(Expr),
    Block(Block),
    If {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Vec<Stmt>,
        cond: Option<Expr>,
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        var: LocalVar,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Switch(Switch),
    Try(Try),
    Throw(Expr),
    Return(Option<Expr>),
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Synchronized {
        lock: Expr,
        body: Block,
    },
    Assert {
        cond: Expr,
        message: Option<Expr>,
    },
    Yield(Expr),
    LocalClass(Box<TypeDecl>),
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Switch {
    pub selector: Box<Expr>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SwitchCase {
    /// Empty for `default`.
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Try {
    /// Try-with-resources entries: `LocalVar` or `Expr` statements.
    pub resources: Vec<Stmt>,
    pub block: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CatchClause {
    pub types: Vec<TypeRef>,
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Call {
    /// Receiver expression; `None` for unqualified calls.
    pub scope: Option<Box<Expr>>,
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    /// Receiver when it is a bare name (`calc` in `calc.add()`).
    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_deref().and_then(Expr::as_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Literal {
    Int(String),
    Float(String),
    Str(String),
    Char(String),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Expr {
    Name(String),
    FieldAccess {
        scope: Box<Expr>,
        name: String,
    },
    Call(Call),
    Literal(Literal),
    New {
        ty: TypeRef,
        args: Vec<Expr>,
        /// Methods of an anonymous class body.
        body: Option<Vec<MethodDecl>>,
    },
    Assign {
        target: Box<Expr>,
        op: String,
        value: Box<Expr>,
    },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Cast {
        ty: TypeRef,
        expr: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: Option<TypeRef>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayCreation {
        ty: TypeRef,
        dims: Vec<Expr>,
        init: Option<Vec<Expr>>,
    },
    ArrayInit(Vec<Expr>),
    Lambda {
        params: Vec<String>,
        body: LambdaBody,
    },
    MethodRef {
        scope: Box<Expr>,
        name: String,
    },
    ClassLit(TypeRef),
    Switch(Switch),
    This,
    Super,
    /// Any construct the model does not name; children stay reachable.
    Other(Vec<Expr>),
}

impl Expr {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Numeric literal, optionally negated (`-1`).
    pub fn is_numeric_literal(&self) -> bool {
        match self {
            Self::Literal(lit) => lit.is_numeric(),
            Self::Unary { op, operand } if op == "-" || op == "+" => operand.is_numeric_literal(),
            _ => false,
        }
    }
}
