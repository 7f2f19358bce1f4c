// Tally Parser Library
// Pest-based parser for notepad calculator lines

pub mod ast;
pub mod error;
pub mod parser;

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;

/// Parse one notepad line into its AST
pub fn parse_line(input: &str) -> Result<Line, ParseError> {
    parser::TallyParser::parse_line(input)
}

/// Parse a line that must hold a plain expression
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    parser::TallyParser::parse_expression(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
