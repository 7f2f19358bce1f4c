// Literal parsing functions for the Tally parser
// Handles number, string, boolean literals and identifiers

use pest::iterators::Pair;

use super::{Rule, TallyParser};
use crate::ast::*;
use crate::error::*;

impl TallyParser {
    /// Parse a numeric literal from a Pest pair
    pub(super) fn parse_number(pair: Pair<Rule>) -> ParseResult<NumberLiteral> {
        let span = Self::span_from_pair(&pair);
        let text = pair.as_str();
        let invalid = || {
            ParseError::invalid_number(
                pair.get_input().to_string(),
                Self::source_span(span),
                text.to_string(),
            )
        };

        let (value, format) = match pair.as_rule() {
            Rule::number_hexadecimal => {
                let hex_part = &text[2..]; // Remove "0x" prefix
                let value = u64::from_str_radix(hex_part, 16).map_err(|_| invalid())?;
                (value as f64, NumberFormat::Hexadecimal)
            }
            Rule::number_decimal => {
                let value = text.parse::<f64>().map_err(|_| invalid())?;
                let format = if text.contains(['e', 'E']) {
                    NumberFormat::Scientific
                } else {
                    NumberFormat::Decimal
                };
                (value, format)
            }
            other => return Err(ParseError::unexpected_rule("number", other, span)),
        };

        Ok(NumberLiteral {
            value,
            format,
            span,
        })
    }

    /// Parse a string literal from a Pest pair
    pub(super) fn parse_string(pair: Pair<Rule>) -> ParseResult<StringLiteral> {
        let span = Self::span_from_pair(&pair);
        let input = pair.get_input().to_string();

        let raw = pair
            .into_inner()
            .find(|part| part.as_rule() == Rule::string_content)
            .map(|part| part.as_str())
            .unwrap_or_default();

        let value = Self::process_escape_sequences(raw).map_err(|found| {
            ParseError::invalid_string_escape(input, Self::source_span(span), found)
        })?;

        Ok(StringLiteral { value, span })
    }

    /// Parse a boolean literal from a Pest pair
    pub(super) fn parse_boolean(pair: Pair<Rule>) -> BooleanLiteral {
        let span = Self::span_from_pair(&pair);
        BooleanLiteral {
            value: pair.as_rule() == Rule::boolean_true,
            span,
        }
    }

    /// Parse an identifier from a Pest pair
    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> Identifier {
        Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        }
    }

    /// Process escape sequences in strings, returning the offending sequence on failure
    fn process_escape_sequences(input: &str) -> Result<String, String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                result.push(ch);
                continue;
            }

            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => return Err(format!("\\{other}")),
                None => return Err("\\".to_string()),
            }
        }

        Ok(result)
    }
}
