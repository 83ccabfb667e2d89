//! Statement execution

use crate::ast::*;
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::stdlib;
use crate::value::{RuntimeError, Value};
use std::sync::Arc;

impl Interpreter<'_> {
    /// Execute a statement
    pub(super) fn eval_statement(
        &mut self,
        stmt: &Stmt,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match stmt {
            Stmt::Expr(expr) => self.eval_expr(expr, env),
            Stmt::Let(decl) => self.eval_let(decl, env),
            Stmt::Print(print) => self.eval_print(print, env),
            // Registered while parsing; evaluating only names it
            Stmt::FunctionDecl(func) => {
                Ok(Value::Function(Arc::from(func.name.name.as_str())))
            }
        }
    }

    /// Bind a new name and yield the whole binding table
    fn eval_let(&mut self, decl: &LetStmt, env: &mut Environment) -> Result<Value, RuntimeError> {
        let redeclared = || RuntimeError::ImmutableRedeclaration {
            name: decl.name.name.clone(),
            span: decl.name.span,
        };

        if env.contains(&decl.name.name) {
            return Err(redeclared());
        }

        let value = self.eval_expr(&decl.value, env)?;

        // The initializer may have declared the name through a function call
        if !env.declare(&decl.name.name, value) {
            return Err(redeclared());
        }

        Ok(env.bindings())
    }

    fn eval_print(
        &mut self,
        print: &PrintStmt,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let value = match &print.value {
            Some(expr) => Some(self.eval_expr(expr, env)?),
            None => None,
        };
        stdlib::print(&mut *self.console, value.as_ref(), print.span)
    }
}
