//! Runtime environment
//!
//! One flat, global namespace shared by the whole run, including the bodies
//! of called functions. Bindings are immutable once declared.

use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// Name -> value bindings of one execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: IndexMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`
    ///
    /// Returns `false` without storing anything if the name is already bound.
    pub fn declare(&mut self, name: &str, value: Value) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        self.variables.insert(name.to_string(), value);
        true
    }

    /// Look up a binding
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// All bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Snapshot of every binding as a value
    pub fn bindings(&self) -> Value {
        Value::Bindings(Arc::new(self.variables.clone()))
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.variables.clear();
    }
}
