//! Expression evaluation

use crate::ast::*;
use crate::environment::Environment;
use crate::interpreter::{Interpreter, MAX_CALL_DEPTH};
use crate::span::Span;
use crate::stdlib::{self, math};
use crate::value::{NameKind, RuntimeError, Value};
use std::cmp::Ordering;

impl Interpreter<'_> {
    /// Evaluate an expression
    pub(super) fn eval_expr(
        &mut self,
        expr: &Expr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit, _) => Ok(eval_literal(lit)),
            Expr::Constant(constant) => Ok(Value::Float(constant.value())),
            Expr::Variable(id) => env
                .lookup(&id.name)
                .cloned()
                .ok_or_else(|| RuntimeError::UndefinedName {
                    kind: NameKind::Variable,
                    name: id.name.clone(),
                    span: id.span,
                }),
            Expr::Not(not) => self.eval_not(not, env),
            Expr::Binary(binary) => self.eval_binary(binary, env),
            Expr::Math(call) => self.eval_math(call, env),
            Expr::Input(input) => self.eval_input(input, env),
            Expr::If(if_expr) => self.eval_if(if_expr, env),
            Expr::Call(call) => self.eval_call(call, env),
        }
    }

    fn eval_not(&mut self, not: &NotExpr, env: &mut Environment) -> Result<Value, RuntimeError> {
        match self.eval_expr(&not.operand, env)? {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(RuntimeError::TypeMismatch {
                msg: format!("'not' expects a boolean, got {}", other.type_name()),
                span: not.span,
            }),
        }
    }

    /// Evaluate both operands, left first, then apply the operator
    fn eval_binary(
        &mut self,
        binary: &BinaryExpr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(&binary.left, env)?;
        let right = self.eval_expr(&binary.right, env)?;
        apply_binary(binary.op, left, right, binary.span)
    }

    fn eval_math(&mut self, call: &MathCall, env: &mut Environment) -> Result<Value, RuntimeError> {
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, env)?);
        }

        let span = call.span;
        match (call.func, args.as_slice()) {
            (MathFunc::Absolute, [x]) => math::absolute(x, span),
            (MathFunc::Sin, [x]) => math::sin(x, self.trig_precision, span),
            (MathFunc::Cos, [x]) => math::cos(x, self.trig_precision, span),
            (MathFunc::Tan, [x]) => math::tan(x, self.trig_precision, span),
            (MathFunc::Pow, [base, exponent]) => math::pow(base, exponent, span),
            (func, _) => Err(RuntimeError::NativeOperator {
                msg: format!(
                    "{}() expects {} argument(s), got {}",
                    func.keyword(),
                    func.arity(),
                    args.len()
                ),
                span,
            }),
        }
    }

    fn eval_input(
        &mut self,
        input: &InputExpr,
        env: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let prompt = match &input.prompt {
            Some(expr) => Some(self.eval_expr(expr, env)?),
            None => None,
        };
        stdlib::input(&mut *self.console, prompt.as_ref(), input.span)
    }

    /// Only an exact `True` condition takes the then branch
    fn eval_if(&mut self, if_expr: &IfExpr, env: &mut Environment) -> Result<Value, RuntimeError> {
        let condition = self.eval_expr(&if_expr.condition, env)?;
        if condition == Value::Bool(true) {
            self.eval_block(&if_expr.then_block, env)
        } else if let Some(else_block) = &if_expr.else_block {
            self.eval_block(else_block, env)
        } else {
            Ok(Value::Null)
        }
    }

    /// Run a registered function body against the caller's environment
    fn eval_call(&mut self, call: &CallExpr, env: &mut Environment) -> Result<Value, RuntimeError> {
        let state = self.state;
        let body = state
            .function(&call.name.name)
            .ok_or_else(|| RuntimeError::UndefinedName {
                kind: NameKind::Function,
                name: call.name.name.clone(),
                span: call.name.span,
            })?;

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::NativeOperator {
                msg: format!(
                    "Maximum call depth of {} exceeded calling <{}>",
                    MAX_CALL_DEPTH, call.name.name
                ),
                span: call.span,
            });
        }

        tracing::trace!(function = %call.name.name, depth = self.call_depth, "call");
        self.call_depth += 1;
        let result = self.eval_block(body, env);
        self.call_depth -= 1;
        result
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Integer(n) => Value::Integer(*n),
        Literal::Float(n) => Value::Float(*n),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::String(s) => Value::string(s.clone()),
    }
}

/// Apply a binary operator to already-evaluated operands
fn apply_binary(
    op: BinaryOp,
    left: Value,
    right: Value,
    span: Span,
) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Sum => add(left, right, span),
        BinaryOp::Sub => arithmetic(op, left, right, span, i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, left, right, span, i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => divide(left, right, span),
        BinaryOp::Equal => Ok(Value::Bool(values_equal(&left, &right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(&left, &right))),
        BinaryOp::GreaterThan => compare(op, &left, &right, span, Ordering::is_gt),
        BinaryOp::LessThan => compare(op, &left, &right, span, Ordering::is_lt),
        BinaryOp::GreaterThanEqual => compare(op, &left, &right, span, Ordering::is_ge),
        BinaryOp::LessThanEqual => compare(op, &left, &right, span, Ordering::is_le),
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value, span: Span) -> RuntimeError {
    RuntimeError::NativeOperator {
        msg: format!(
            "Unsupported operand types for {}: {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ),
        span,
    }
}

fn overflow(op: BinaryOp, span: Span) -> RuntimeError {
    RuntimeError::NativeOperator {
        msg: format!("Integer overflow in {}", op.name()),
        span,
    }
}

fn add(left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        _ => arithmetic(BinaryOp::Sum, left, right, span, i64::checked_add, |a, b| a + b),
    }
}

/// Integer arithmetic stays integral; any float operand promotes
fn arithmetic(
    op: BinaryOp,
    left: Value,
    right: Value,
    span: Span,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => int_op(*a, *b)
            .map(Value::Integer)
            .ok_or_else(|| overflow(op, span)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
            _ => Err(unsupported(op, &left, &right, span)),
        },
    }
}

/// True division: the result is always a float
fn divide(left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
    match (left.as_f64(), right.as_f64()) {
        (Some(_), Some(b)) if b == 0.0 => Err(RuntimeError::NativeOperator {
            msg: "Division by zero".to_string(),
            span,
        }),
        (Some(a), Some(b)) => Ok(Value::Float(a / b)),
        _ => Err(unsupported(BinaryOp::Div, &left, &right, span)),
    }
}

/// Equality across kinds; integers and floats compare numerically
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
            left.as_f64() == right.as_f64()
        }
        _ => left == right,
    }
}

fn compare(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    span: Span,
    test: fn(Ordering) -> bool,
) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(unsupported(op, left, right, span)),
        },
    };
    // NaN is unordered: every ordering test is false
    Ok(Value::Bool(ordering.map(test).unwrap_or(false)))
}
