//! Syntax traversal.
//!
//! Implement `Visit` on a per-method context struct, override the node
//! kinds of interest, and call the matching `walk_*` function to keep
//! descending. Traversal is pre-order except for calls: `walk_call`
//! visits the receiver and arguments, so overriding `visit_call` and
//! calling `walk_call` first checks inner calls before outer ones.

use super::types::*;

pub trait Visit {
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_local_var(&mut self, var: &LocalVar) {
        walk_local_var(self, var);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) {
        walk_catch_clause(self, clause);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_call(&mut self, call: &Call) {
        walk_call(self, call);
    }

    /// Methods of local and anonymous classes inside a body.
    fn visit_nested_method(&mut self, method: &MethodDecl) {
        walk_method_body(self, method);
    }
}

/// Visit every statement of a method body.
pub fn walk_method_body<V: Visit + ?Sized>(v: &mut V, method: &MethodDecl) {
    if let Some(body) = &method.body {
        v.visit_block(body);
    }
}

pub fn walk_block<V: Visit + ?Sized>(v: &mut V, block: &Block) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::LocalVar(var) => v.visit_local_var(var),
        Stmt::Expr(expr) | Stmt::Throw(expr) | Stmt::Yield(expr) => v.visit_expr(expr),
        Stmt::Block(block) => v.visit_block(block),
        Stmt::If {
            cond,
            then,
            otherwise,
        } => {
            v.visit_expr(cond);
            v.visit_stmt(then);
            if let Some(otherwise) = otherwise {
                v.visit_stmt(otherwise);
            }
        }
        Stmt::While { cond, body } => {
            v.visit_expr(cond);
            v.visit_stmt(body);
        }
        Stmt::DoWhile { body, cond } => {
            v.visit_stmt(body);
            v.visit_expr(cond);
        }
        Stmt::For {
            init,
            cond,
            update,
            body,
        } => {
            for s in init {
                v.visit_stmt(s);
            }
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            for e in update {
                v.visit_expr(e);
            }
            v.visit_stmt(body);
        }
        Stmt::ForEach {
            var,
            iterable,
            body,
        } => {
            v.visit_local_var(var);
            v.visit_expr(iterable);
            v.visit_stmt(body);
        }
        Stmt::Switch(switch) => walk_switch(v, switch),
        Stmt::Try(t) => {
            for resource in &t.resources {
                v.visit_stmt(resource);
            }
            v.visit_block(&t.block);
            for clause in &t.catches {
                v.visit_catch_clause(clause);
            }
            if let Some(finally) = &t.finally {
                v.visit_block(finally);
            }
        }
        Stmt::Return(expr) => {
            if let Some(expr) = expr {
                v.visit_expr(expr);
            }
        }
        Stmt::Labeled { body, .. } => v.visit_stmt(body),
        Stmt::Synchronized { lock, body } => {
            v.visit_expr(lock);
            v.visit_block(body);
        }
        Stmt::Assert { cond, message } => {
            v.visit_expr(cond);
            if let Some(message) = message {
                v.visit_expr(message);
            }
        }
        Stmt::LocalClass(ty) => {
            for method in ty.constructors.iter().chain(&ty.methods) {
                v.visit_nested_method(method);
            }
        }
        Stmt::Break | Stmt::Continue => {}
    }
}

pub fn walk_local_var<V: Visit + ?Sized>(v: &mut V, var: &LocalVar) {
    for declarator in &var.variables {
        if let Some(init) = &declarator.init {
            v.visit_expr(init);
        }
    }
}

pub fn walk_catch_clause<V: Visit + ?Sized>(v: &mut V, clause: &CatchClause) {
    v.visit_block(&clause.body);
}

pub fn walk_switch<V: Visit + ?Sized>(v: &mut V, switch: &Switch) {
    v.visit_expr(&switch.selector);
    for case in &switch.cases {
        for label in &case.labels {
            v.visit_expr(label);
        }
        for stmt in &case.body {
            v.visit_stmt(stmt);
        }
    }
}

pub fn walk_call<V: Visit + ?Sized>(v: &mut V, call: &Call) {
    if let Some(scope) = &call.scope {
        v.visit_expr(scope);
    }
    for arg in &call.args {
        v.visit_expr(arg);
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Name(_) | Expr::Literal(_) | Expr::ClassLit(_) | Expr::This | Expr::Super => {}
        Expr::FieldAccess { scope, .. } | Expr::MethodRef { scope, .. } => v.visit_expr(scope),
        Expr::Call(call) => v.visit_call(call),
        Expr::New { args, body, .. } => {
            for arg in args {
                v.visit_expr(arg);
            }
            for method in body.iter().flatten() {
                v.visit_nested_method(method);
            }
        }
        Expr::Assign { target, value, .. } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Cast { expr, .. } | Expr::InstanceOf { expr, .. } => v.visit_expr(expr),
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            v.visit_expr(cond);
            v.visit_expr(then);
            v.visit_expr(otherwise);
        }
        Expr::ArrayAccess { array, index } => {
            v.visit_expr(array);
            v.visit_expr(index);
        }
        Expr::ArrayCreation { dims, init, .. } => {
            for dim in dims {
                v.visit_expr(dim);
            }
            for e in init.iter().flatten() {
                v.visit_expr(e);
            }
        }
        Expr::ArrayInit(items) | Expr::Other(items) => {
            for item in items {
                v.visit_expr(item);
            }
        }
        Expr::Lambda { body, .. } => match body {
            LambdaBody::Expr(expr) => v.visit_expr(expr),
            LambdaBody::Block(block) => v.visit_block(block),
        },
        Expr::Switch(switch) => walk_switch(v, switch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CallNames(Vec<String>);

    impl Visit for CallNames {
        fn visit_call(&mut self, call: &Call) {
            walk_call(self, call);
            self.0.push(call.name.clone());
        }
    }

    fn call(name: &str, scope: Option<Expr>, args: Vec<Expr>) -> Expr {
        Expr::Call(Call {
            scope: scope.map(Box::new),
            name: name.to_string(),
            args,
        })
    }

    #[test]
    fn test_inner_calls_are_visited_before_outer() {
        let inner = call("add", Some(Expr::Name("calc".into())), vec![]);
        let outer = call("assertEquals", None, vec![inner]);
        let block = Block {
            stmts: vec![Stmt::Expr(outer)],
        };

        let mut names = CallNames(Vec::new());
        names.visit_block(&block);
        assert_eq!(names.0, vec!["add", "assertEquals"]);
    }

    #[test]
    fn test_lambda_and_catch_bodies_are_reached() {
        let lambda = Expr::Lambda {
            params: vec![],
            body: LambdaBody::Expr(Box::new(call("run", None, vec![]))),
        };
        let stmt = Stmt::Try(Try {
            resources: vec![],
            block: Block {
                stmts: vec![Stmt::Expr(lambda)],
            },
            catches: vec![CatchClause {
                types: vec![TypeRef::from_text("Exception")],
                name: "e".into(),
                body: Block {
                    stmts: vec![Stmt::Expr(call("fail", None, vec![]))],
                },
            }],
            finally: None,
        });

        let mut names = CallNames(Vec::new());
        names.visit_stmt(&stmt);
        assert_eq!(names.0, vec!["run", "fail"]);
    }
}
