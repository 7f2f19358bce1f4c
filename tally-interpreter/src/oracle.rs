//! The expression oracle consulted by the line evaluator.
//!
//! The engine never looks inside an expression. It hands the oracle a line of
//! code, keeps the parsed and compiled handles it gets back in its cache, and
//! asks the oracle to evaluate the compiled form against the pass scope.

use crate::compiler::{self, CompiledLine};
use crate::error::RuntimeError;
use crate::evaluator::ExpressionEvaluator;
use crate::scope::Scope;
use crate::value::Value;
use miette::Diagnostic;
use std::rc::Rc;
use tally_parser::{Line, ParseError};
use thiserror::Error;

/// Shared handle to a parsed line
pub type Parsed = Rc<Line>;

/// Shared handle to a compiled line
pub type Compiled = Rc<CompiledLine>;

/// Failure reported by the oracle for one line
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Parser, compiler and evaluator for the expression on a single line
pub trait Oracle {
    fn parse(&self, code: &str) -> Result<Parsed, OracleError>;

    fn compile(&self, parsed: &Parsed) -> Result<Compiled, OracleError>;

    /// Evaluate a compiled line; `Ok(None)` when the line has no value
    fn evaluate(&self, compiled: &Compiled, scope: &mut Scope) -> Result<Option<Value>, OracleError>;

    /// Addition used to accumulate summation blocks
    fn add(&self, left: &Value, right: &Value) -> Result<Value, OracleError>;

    /// Starting value of a summation block
    fn zero(&self) -> Value;

    /// Whether a parsed line only declares something, so its value is not
    /// worth displaying
    fn is_declaration(&self, parsed: &Parsed) -> bool;
}

/// Oracle backed by the Tally expression language
#[derive(Debug, Clone, Default)]
pub struct MathOracle {
    evaluator: ExpressionEvaluator,
}

impl MathOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluator(evaluator: ExpressionEvaluator) -> Self {
        Self { evaluator }
    }
}

impl Oracle for MathOracle {
    fn parse(&self, code: &str) -> Result<Parsed, OracleError> {
        Ok(Rc::new(tally_parser::parse_line(code)?))
    }

    fn compile(&self, parsed: &Parsed) -> Result<Compiled, OracleError> {
        Ok(Rc::new(compiler::compile_line(parsed)?))
    }

    fn evaluate(&self, compiled: &Compiled, scope: &mut Scope) -> Result<Option<Value>, OracleError> {
        Ok(self.evaluator.evaluate_line(compiled, scope)?)
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value, OracleError> {
        Ok(left.add(right)?)
    }

    fn zero(&self) -> Value {
        Value::Number(0.0)
    }

    fn is_declaration(&self, parsed: &Parsed) -> bool {
        parsed.is_declaration()
    }
}
