//! Tally Interpreter
//!
//! Compiles and evaluates parsed notepad lines. Each line is compiled once
//! (built-in functions resolved, their arity checked) and then evaluated
//! against a `Scope` that the caller threads from line to line.
//!
//! The `Oracle` trait is the seam the notepad engine talks through;
//! `MathOracle` is the implementation backed by this crate.

pub mod builtins;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod oracle;
pub mod scope;
pub mod test_harness;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

// Re-export public API
pub use compiler::{CompiledExpression, CompiledLine, compile_expression, compile_line};
pub use error::{Result, RuntimeError};
pub use evaluator::ExpressionEvaluator;
pub use oracle::{Compiled, MathOracle, Oracle, OracleError, Parsed};
pub use scope::{LAST, Scope};
pub use test_harness::{InterpreterSession, TestHarnessError};
pub use value::{UserFunction, Value};

/// Parse, compile and evaluate one line against `scope`
///
/// Convenient for tests and one-off evaluation; the notepad engine goes
/// through the `Oracle` trait so it can cache the intermediate forms.
pub fn evaluate_from_string(
    source: &str,
    scope: &mut Scope,
) -> std::result::Result<Option<Value>, OracleError> {
    let oracle = MathOracle::new();
    let parsed = oracle.parse(source)?;
    let compiled = oracle.compile(&parsed)?;
    oracle.evaluate(&compiled, scope)
}
