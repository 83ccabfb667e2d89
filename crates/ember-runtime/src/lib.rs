//! Ember Runtime - Core language implementation
//!
//! This library provides the complete Ember language runtime including:
//! - Lexical analysis and parsing, with a parse-time symbol table
//! - Tree-walking evaluation over one flat, global environment
//! - Console and math primitives
//! - Diagnostics shared by every phase

/// Ember runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod stdlib;
pub mod symbol;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use diagnostic::formatter::{ColorMode, DiagnosticFormatter};
pub use diagnostic::{error_codes, sort_diagnostics, Diagnostic, DiagnosticLevel, DIAG_VERSION};
pub use environment::Environment;
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use repl::{ReplCore, ReplResult};
pub use runtime::{compile, Ember, EvalOutput, Execution, RuntimeConfig, RuntimeResult};
pub use span::Span;
pub use stdlib::{BufferedConsole, Console, StdConsole};
pub use symbol::ParserState;
pub use token::{Token, TokenKind};
pub use value::{NameKind, RuntimeError, Value};
