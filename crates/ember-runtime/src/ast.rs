//! Abstract Syntax Tree (AST) definitions
//!
//! Every node carries a span. The `Display` impls render the stable debug
//! representation used by `ember ast` and the snapshot tests, for example
//! `Sum(Integer(5), Integer(2))`.

use crate::span::Span;
use crate::value::format_float;
use std::f64::consts;
use std::fmt;

/// Top-level program: one or more statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Braced statement list used by `if` branches and function bodies
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    /// Create a block from its statements
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Self { statements, span }
    }
}

/// Identifier with span
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for its value or effects
    Expr(Expr),
    /// `let name = value`
    Let(LetStmt),
    /// `print()` / `print(value)`
    Print(PrintStmt),
    /// `function name() { ... }`
    FunctionDecl(FunctionDecl),
}

/// Variable declaration with initializer
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Identifier,
    pub value: Expr,
    pub span: Span,
}

/// Print statement
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

/// Parameterless function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub body: Block,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    Constant(NamedConstant),
    Variable(Identifier),
    Not(NotExpr),
    Binary(BinaryExpr),
    Math(MathCall),
    Input(InputExpr),
    If(IfExpr),
    Call(CallExpr),
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

/// Named mathematical constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

/// `__PI__`, `-__PI__`, `__E__` or `-__E__`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedConstant {
    pub constant: Constant,
    pub negated: bool,
    pub span: Span,
}

impl NamedConstant {
    /// Numeric value of the constant
    pub fn value(&self) -> f64 {
        let base = match self.constant {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
        };
        if self.negated {
            -base
        } else {
            base
        }
    }

    fn name(&self) -> &'static str {
        match (self.constant, self.negated) {
            (Constant::Pi, false) => "__PI__",
            (Constant::Pi, true) => "-__PI__",
            (Constant::E, false) => "__E__",
            (Constant::E, true) => "-__E__",
        }
    }
}

/// `not` expression
#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Binary expression
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Sum,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanEqual,
    LessThanEqual,
    And,
    Or,
}

impl BinaryOp {
    /// Node name in the debug representation
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Sum => "Sum",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::Equal => "Equal",
            BinaryOp::NotEqual => "NotEqual",
            BinaryOp::GreaterThan => "GreaterThan",
            BinaryOp::LessThan => "LessThan",
            BinaryOp::GreaterThanEqual => "GreaterThanEqual",
            BinaryOp::LessThanEqual => "LessThanEqual",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
        }
    }

    /// Source symbol of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Sum => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThanEqual => ">=",
            BinaryOp::LessThanEqual => "<=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

/// Built-in math functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunc {
    Absolute,
    Sin,
    Cos,
    Tan,
    Pow,
}

impl MathFunc {
    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        match self {
            MathFunc::Pow => 2,
            _ => 1,
        }
    }

    /// Keyword used to call the function
    pub fn keyword(&self) -> &'static str {
        match self {
            MathFunc::Absolute => "abs",
            MathFunc::Sin => "sin",
            MathFunc::Cos => "cos",
            MathFunc::Tan => "tan",
            MathFunc::Pow => "pow",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MathFunc::Absolute => "Absolute",
            MathFunc::Sin => "Sin",
            MathFunc::Cos => "Cos",
            MathFunc::Tan => "Tan",
            MathFunc::Pow => "Pow",
        }
    }
}

/// Call of a built-in math function; `args.len() == func.arity()`
#[derive(Debug, Clone, PartialEq)]
pub struct MathCall {
    pub func: MathFunc,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Console input with optional prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InputExpr {
    pub prompt: Option<Box<Expr>>,
    pub span: Span,
}

/// `if (condition) { ... } else { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub span: Span,
}

/// Zero-argument call of a user function
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: Identifier,
    pub span: Span,
}

impl Expr {
    /// Get the span of this expression
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span) => *span,
            Expr::Constant(c) => c.span,
            Expr::Variable(id) => id.span,
            Expr::Not(n) => n.span,
            Expr::Binary(b) => b.span,
            Expr::Math(m) => m.span,
            Expr::Input(i) => i.span,
            Expr::If(i) => i.span,
            Expr::Call(c) => c.span,
        }
    }

    /// Whether the expression ends with a closing brace
    pub fn ends_with_block(&self) -> bool {
        matches!(self, Expr::If(_))
    }
}

impl Stmt {
    /// Get the span of this statement
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(expr) => expr.span(),
            Stmt::Let(l) => l.span,
            Stmt::Print(p) => p.span,
            Stmt::FunctionDecl(f) => f.span,
        }
    }

    /// Whether the statement is complete without a trailing `;`
    pub fn ends_with_block(&self) -> bool {
        match self {
            Stmt::FunctionDecl(_) => true,
            Stmt::Expr(expr) => expr.ends_with_block(),
            _ => false,
        }
    }
}

// === Debug representation ===

fn write_statements(f: &mut fmt::Formatter<'_>, node: &str, statements: &[Stmt]) -> fmt::Result {
    write!(f, "{}(", node)?;
    for statement in statements {
        write!(f, "\n\t{}", statement)?;
    }
    write!(f, "\n)")
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, "Program", &self.statements)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, "Block", &self.statements)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expr(expr) => write!(f, "{}", expr),
            Stmt::Let(l) => write!(f, "Assignment(Variable({}), {})", l.name.name, l.value),
            Stmt::Print(p) => match &p.value {
                Some(value) => write!(f, "Print({})", value),
                None => write!(f, "Print()"),
            },
            Stmt::FunctionDecl(func) => {
                write!(f, "FunctionDeclaration({}, {})", func.name.name, func.body)
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "Integer({})", n),
            Literal::Float(n) => write!(f, "Float({})", format_float(*n)),
            Literal::Boolean(true) => write!(f, "Boolean(True)"),
            Literal::Boolean(false) => write!(f, "Boolean(False)"),
            Literal::String(s) => write!(f, "String(\"{}\")", s),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit, _) => write!(f, "{}", lit),
            Expr::Constant(c) => write!(f, "{}({:.6})", c.name(), c.value()),
            Expr::Variable(id) => write!(f, "Variable({})", id.name),
            Expr::Not(n) => write!(f, "Not({})", n.operand),
            Expr::Binary(b) => write!(f, "{}({}, {})", b.op.name(), b.left, b.right),
            Expr::Math(m) => {
                write!(f, "{}(", m.func.name())?;
                for (i, arg) in m.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Input(i) => match &i.prompt {
                Some(prompt) => write!(f, "Input({})", prompt),
                None => write!(f, "Input()"),
            },
            Expr::If(i) => {
                write!(f, "If({}) Then({})", i.condition, i.then_block)?;
                if let Some(else_block) = &i.else_block {
                    write!(f, " Else({})", else_block)?;
                }
                Ok(())
            }
            Expr::Call(c) => write!(f, "CallFunction({})", c.name.name),
        }
    }
}
