// Tally Parser Error Handling
// Error reporting with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{message}")]
    #[diagnostic(
        code(tally::parse::syntax_error),
        help("Check the syntax near the highlighted location")
    )]
    Syntax {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid number literal {found}")]
    #[diagnostic(
        code(tally::parse::invalid_number),
        help("Numbers look like 42, 3.14, 1.2e-5 or 0xff")
    )]
    InvalidNumber {
        #[source_code]
        src: String,
        #[label("invalid number")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid string escape sequence {found}")]
    #[diagnostic(
        code(tally::parse::invalid_string_escape),
        help("Valid escape sequences: \\n, \\t, \\r, \\\\, \\\"")
    )]
    InvalidStringEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("Unexpected grammar rule {found:?}, expected {expected}")]
    #[diagnostic(code(tally::parse::unexpected_rule))]
    UnexpectedRule {
        expected: String,
        found: Rule,
        span: crate::ast::Span,
    },

    #[error("Missing {expected} in parse tree")]
    #[diagnostic(code(tally::parse::missing_node))]
    MissingNode {
        expected: String,
        span: crate::ast::Span,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let (position, span) = match error.location {
            pest::error::InputLocation::Pos(pos) => (pos, SourceSpan::new(pos.into(), 1)),
            pest::error::InputLocation::Span((start, end)) => {
                (start, SourceSpan::new(start.into(), end - start))
            }
        };

        let expected = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                describe_expected(positives)
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        // Character positions are 1-based, counted in chars rather than bytes
        let column = src[..position.min(src.len())].chars().count() + 1;
        let message = if position >= src.trim_end().len() {
            format!("Unexpected end of expression, expected {expected} (char {column})")
        } else {
            format!("Syntax error, expected {expected} (char {column})")
        };

        ParseError::Syntax { src, span, message }
    }

    /// Create an invalid number error
    pub fn invalid_number(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidNumber { src, span, found }
    }

    /// Create an invalid string escape error
    pub fn invalid_string_escape(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidStringEscape { src, span, found }
    }

    /// Create an unexpected rule error
    pub fn unexpected_rule(expected: &str, found: Rule, span: crate::ast::Span) -> Self {
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found,
            span,
        }
    }

    /// Create a missing node error
    pub fn missing_node(expected: &str, span: crate::ast::Span) -> Self {
        ParseError::MissingNode {
            expected: expected.to_string(),
            span,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

fn describe_expected(rules: &[Rule]) -> String {
    let mut descriptions: Vec<&str> = Vec::new();
    for description in rules.iter().map(rule_description) {
        if !descriptions.contains(&description) {
            descriptions.push(description);
        }
    }

    match descriptions.as_slice() {
        [] => "a value".to_string(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// Convert a parser rule to a user-friendly description
fn rule_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::number_decimal | Rule::number_hexadecimal => "a number",
        Rule::string | Rule::string_content => "a string",
        Rule::boolean_true | Rule::boolean_false => "a boolean",
        Rule::identifier => "a name",
        Rule::expression | Rule::parenthesized | Rule::function_call => "a value",
        Rule::argument_list => "an argument",
        Rule::parameter_list => "a parameter name",
        Rule::op_equal
        | Rule::op_not_equal
        | Rule::op_less_equal
        | Rule::op_greater_equal
        | Rule::op_less
        | Rule::op_greater
        | Rule::op_add
        | Rule::op_subtract
        | Rule::op_multiply
        | Rule::op_divide
        | Rule::op_modulo
        | Rule::op_exponent => "an operator",
        Rule::op_unary_minus | Rule::op_unary_plus => "a value",
        Rule::op_factorial => "an operator",
        Rule::EOI => "end of line",
        _ => "a value",
    }
}
