//! Parse-time symbol table
//!
//! `ParserState` is threaded through every grammar production as an explicit
//! mutable context. Function declarations are registered here the moment they
//! are parsed, which makes every function visible to the whole program
//! regardless of declaration order.

use crate::ast::{Block, Expr};
use indexmap::IndexMap;

/// Declarations collected while parsing a compilation unit
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    /// Variable name -> initializer expression of its first `let`
    pub variables: IndexMap<String, Expr>,
    /// Function name -> body of its latest declaration
    pub functions: IndexMap<String, Block>,
}

impl ParserState {
    /// Create an empty parser state
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function body, replacing any earlier declaration
    ///
    /// Returns `true` if a previous body was overwritten.
    pub fn register_function(&mut self, name: &str, body: Block) -> bool {
        let replaced = self.functions.insert(name.to_string(), body).is_some();
        tracing::debug!(function = name, replaced, "registered function");
        replaced
    }

    /// Record the initializer of a `let`
    ///
    /// Only the first declaration is kept; a repeated `let` is rejected when
    /// it is evaluated.
    pub fn record_variable(&mut self, name: &str, initializer: &Expr) {
        self.variables
            .entry(name.to_string())
            .or_insert_with(|| initializer.clone());
    }

    /// Look up a function body
    pub fn function(&self, name: &str) -> Option<&Block> {
        self.functions.get(name)
    }

    /// Whether a function with this name has been declared
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Declared function names, in first-declaration order
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Drop every declaration
    pub fn clear(&mut self) {
        self.variables.clear();
        self.functions.clear();
    }
}
