//! Variable scope threaded through the lines of one evaluation pass.

use crate::value::Value;
use indexmap::IndexMap;

/// Name of the binding that always holds the most recent line result
pub const LAST: &str = "last";

/// Mapping from variable name to value, in binding order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    variables: IndexMap<String, Value>,
}

impl Scope {
    /// Empty scope without any seeded bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for a fresh pass, seeded with `last = 0`
    pub fn seeded() -> Self {
        let mut scope = Self::new();
        scope.set(LAST, Value::Number(0.0));
        scope
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Value of the `last` binding
    pub fn last(&self) -> Option<&Value> {
        self.get(LAST)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
