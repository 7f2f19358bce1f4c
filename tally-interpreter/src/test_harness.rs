//! Interpreter session for exercising the Tally interpreter
//!
//! Evaluates lines one after another against a persistent scope, the way a
//! notepad pass does, and offers assertions on the produced values.

use crate::{MathOracle, Oracle, OracleError, Scope, Value};
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during test harness operations
#[derive(Debug, Error, Diagnostic)]
pub enum TestHarnessError {
    #[error("Oracle error: {source}")]
    Oracle {
        #[from]
        source: OracleError,
    },

    #[error("Line `{code}` produced no value")]
    NoValue { code: String },

    #[error("Assertion failed: expected {expected}, but got {actual}")]
    AssertionFailed { expected: String, actual: String },

    #[error("Type error: expected {expected_type}, got {actual_type}")]
    TypeError {
        expected_type: String,
        actual_type: String,
    },

    #[error("Variable {name} is not bound")]
    UnboundVariable { name: String },
}

/// Line-by-line evaluation session with a persistent scope
#[derive(Debug)]
pub struct InterpreterSession {
    oracle: MathOracle,
    scope: Scope,
}

impl Default for InterpreterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterSession {
    /// New session with a seeded scope (`last = 0`)
    pub fn new() -> Self {
        Self {
            oracle: MathOracle::new(),
            scope: Scope::seeded(),
        }
    }

    /// Evaluate one line, failing when it has no value
    pub fn evaluate(&mut self, code: &str) -> Result<Value, TestHarnessError> {
        self.evaluate_line(code)?
            .ok_or_else(|| TestHarnessError::NoValue {
                code: code.to_string(),
            })
    }

    /// Evaluate one line; blank and comment lines give `None`
    pub fn evaluate_line(&mut self, code: &str) -> Result<Option<Value>, TestHarnessError> {
        let parsed = self.oracle.parse(code)?;
        let compiled = self.oracle.compile(&parsed)?;
        Ok(self.oracle.evaluate(&compiled, &mut self.scope)?)
    }

    pub fn assert_evaluates_to_number(&mut self, code: &str, expected: f64) -> Result<(), TestHarnessError> {
        match self.evaluate(code)? {
            Value::Number(actual) if (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0) => Ok(()),
            Value::Number(actual) => Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }),
            other => Err(TestHarnessError::TypeError {
                expected_type: "number".to_string(),
                actual_type: other.type_name().to_string(),
            }),
        }
    }

    pub fn assert_evaluates_to_boolean(&mut self, code: &str, expected: bool) -> Result<(), TestHarnessError> {
        match self.evaluate(code)? {
            Value::Boolean(actual) if actual == expected => Ok(()),
            Value::Boolean(actual) => Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }),
            other => Err(TestHarnessError::TypeError {
                expected_type: "boolean".to_string(),
                actual_type: other.type_name().to_string(),
            }),
        }
    }

    pub fn assert_evaluates_to_string(&mut self, code: &str, expected: &str) -> Result<(), TestHarnessError> {
        match self.evaluate(code)? {
            Value::String(actual) if actual == expected => Ok(()),
            Value::String(actual) => Err(TestHarnessError::AssertionFailed {
                expected: expected.to_string(),
                actual,
            }),
            other => Err(TestHarnessError::TypeError {
                expected_type: "string".to_string(),
                actual_type: other.type_name().to_string(),
            }),
        }
    }

    pub fn define_variable(&mut self, name: &str, value: Value) {
        self.scope.set(name, value);
    }

    pub fn get_variable(&self, name: &str) -> Result<&Value, TestHarnessError> {
        self.scope
            .get(name)
            .ok_or_else(|| TestHarnessError::UnboundVariable {
                name: name.to_string(),
            })
    }

    pub fn clear_variables(&mut self) {
        self.scope = Scope::seeded();
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}
