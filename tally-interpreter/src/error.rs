//! Runtime error types for the Tally interpreter.
//!
//! Provides error handling with diagnostics via miette integration.

use miette::{Diagnostic, SourceSpan};
use tally_parser::Span;
use thiserror::Error;

/// Runtime errors that can occur while compiling or evaluating a line
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined symbol {name}")]
    #[diagnostic(
        code(tally::runtime::undefined_symbol),
        help("Assign a value to it on an earlier line, e.g. {name} = 42")
    )]
    UndefinedSymbol {
        name: String,
        #[label("undefined symbol")]
        span: Option<SourceSpan>,
    },

    #[error("Undefined function {name}")]
    #[diagnostic(
        code(tally::runtime::undefined_function),
        help("Define it on an earlier line, e.g. {name}(x) = x * 2")
    )]
    UndefinedFunction {
        name: String,
        #[label("undefined function")]
        span: Option<SourceSpan>,
    },

    #[error("{name} is not a function")]
    #[diagnostic(code(tally::runtime::not_a_function))]
    NotAFunction {
        name: String,
        #[label("called here")]
        span: Option<SourceSpan>,
    },

    #[error("Wrong number of arguments in function {function} ({found} provided, {expected} expected)")]
    #[diagnostic(
        code(tally::runtime::wrong_arity),
        help("Check the function signature for the correct number of arguments")
    )]
    WrongArity {
        function: String,
        expected: String,
        found: usize,
        #[label("wrong number of arguments")]
        span: Option<SourceSpan>,
    },

    #[error("Cannot apply {operation} to {operand_types}")]
    #[diagnostic(
        code(tally::runtime::invalid_operation),
        help("Check that the operation is supported for these types")
    )]
    InvalidOperation {
        operation: String,
        operand_types: String, // Join types with " and " when creating the error
        #[label("invalid operation")]
        span: Option<SourceSpan>,
    },

    #[error("Value {value} is not a non-negative integer")]
    #[diagnostic(code(tally::runtime::invalid_factorial))]
    InvalidFactorial {
        value: String,
        #[label("factorial of this value")]
        span: Option<SourceSpan>,
    },

    #[error("Maximum call depth of {max_depth} exceeded")]
    #[diagnostic(
        code(tally::runtime::recursion_limit),
        help("A function that calls itself needs a way to stop")
    )]
    RecursionLimit { max_depth: usize },
}

impl RuntimeError {
    /// Create an undefined symbol error
    pub fn undefined_symbol(name: &str, span: Span) -> Self {
        Self::UndefinedSymbol {
            name: name.to_string(),
            span: Some(span_to_source_span(span)),
        }
    }

    /// Create an undefined function error
    pub fn undefined_function(name: &str, span: Span) -> Self {
        Self::UndefinedFunction {
            name: name.to_string(),
            span: Some(span_to_source_span(span)),
        }
    }

    /// Create a not-a-function error
    pub fn not_a_function(name: &str, span: Span) -> Self {
        Self::NotAFunction {
            name: name.to_string(),
            span: Some(span_to_source_span(span)),
        }
    }

    /// Create a wrong arity error
    pub fn wrong_arity(function: &str, expected: String, found: usize, span: Span) -> Self {
        Self::WrongArity {
            function: function.to_string(),
            expected,
            found,
            span: Some(span_to_source_span(span)),
        }
    }

    /// Create an invalid operation error without location
    pub fn invalid_operation(operation: &str, operand_types: &[&str]) -> Self {
        Self::InvalidOperation {
            operation: operation.to_string(),
            operand_types: operand_types.join(" and "),
            span: None,
        }
    }

    /// Attach a location to an error raised by a value operation
    pub fn with_span(self, span: Span) -> Self {
        match self {
            Self::InvalidOperation {
                operation,
                operand_types,
                span: None,
            } => Self::InvalidOperation {
                operation,
                operand_types,
                span: Some(span_to_source_span(span)),
            },
            Self::InvalidFactorial { value, span: None } => Self::InvalidFactorial {
                value,
                span: Some(span_to_source_span(span)),
            },
            other => other,
        }
    }
}

/// Convert parser Span to miette SourceSpan
fn span_to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, RuntimeError>;
