//! Runtime value representation
//!
//! Values produced by the interpreter, and the errors evaluation can raise.

use crate::diagnostic::error_codes;
use crate::span::Span;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value (printed as `None`)
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// IEEE 754 double
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Snapshot of the variable bindings, produced by a `let`
    Bindings(Arc<IndexMap<String, Value>>),
    /// A declared function, produced by evaluating its declaration
    Function(Arc<str>),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "none",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
            Value::Bindings(_) => "bindings",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by `and` / `or`
    ///
    /// Falsy: `None`, `False`, `0`, `0.0`, `""` and empty bindings.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Bindings(b) => !b.is_empty(),
            Value::Function(_) => true,
        }
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to the string written by `print`
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Representation inside a bindings listing: strings are quoted
    pub fn to_repr_string(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}

/// Format a float the way `print` shows it
///
/// Whole numbers keep a `.0` suffix so floats stay distinguishable from
/// integers. Magnitudes from 1e16 up, and nonzero ones below 1e-4, use
/// exponent form such as `1e+20` or `2.5e-07`.
pub fn format_float(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n == f64::INFINITY {
        "inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if n.abs() >= 1e16 || (n != 0.0 && n.abs() < 1e-4) {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

/// Signed exponent of at least two digits: `1e+20`, `-3.5e-05`
fn exponent_form(n: f64) -> String {
    let formatted = format!("{:e}", n);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", format_float(*n)),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Bindings(bindings) => {
                write!(f, "{{")?;
                for (i, (name, value)) in bindings.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value.to_repr_string())?;
                }
                write!(f, "}}")
            }
            Value::Function(name) => write!(f, "<function '{}'>", name),
        }
    }
}

/// Kind of name that failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Variable,
    Function,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Variable => write!(f, "Variable"),
            NameKind::Function => write!(f, "Function"),
        }
    }
}

/// Runtime error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Variable or function referenced before declaration
    #[error("{kind} <{name}> is not yet defined")]
    UndefinedName {
        kind: NameKind,
        name: String,
        span: Span,
    },
    /// Second `let` for an existing name
    #[error("Variable <{name}> is immutable and cannot be declared again")]
    ImmutableRedeclaration { name: String, span: Span },
    /// Malformed boolean or `not` on a non-boolean
    #[error("Type mismatch: {msg}")]
    TypeMismatch { msg: String, span: Span },
    /// Math function argument that does not look numeric
    #[error("{function}() expects a numeric argument, got '{value}'")]
    NonNumericArgument {
        function: &'static str,
        value: String,
        span: Span,
    },
    /// Operator failure: division by zero, overflow, incompatible operands
    #[error("{msg}")]
    NativeOperator { msg: String, span: Span },
    /// Console read or write failure
    #[error("I/O error: {message}")]
    Io { message: String, span: Span },
}

impl RuntimeError {
    /// Get the source span for this error
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedName { span, .. } => *span,
            RuntimeError::ImmutableRedeclaration { span, .. } => *span,
            RuntimeError::TypeMismatch { span, .. } => *span,
            RuntimeError::NonNumericArgument { span, .. } => *span,
            RuntimeError::NativeOperator { span, .. } => *span,
            RuntimeError::Io { span, .. } => *span,
        }
    }

    /// Diagnostic code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::UndefinedName { .. } => error_codes::UNDEFINED_NAME,
            RuntimeError::ImmutableRedeclaration { .. } => error_codes::IMMUTABLE_REDECLARATION,
            RuntimeError::TypeMismatch { .. } => error_codes::TYPE_MISMATCH,
            RuntimeError::NonNumericArgument { .. } => error_codes::NON_NUMERIC_ARGUMENT,
            RuntimeError::NativeOperator { .. } => error_codes::NATIVE_OPERATOR,
            RuntimeError::Io { .. } => error_codes::IO_ERROR,
        }
    }
}
