// Tally parser
// Pest-driven parsing of a single notepad line into the AST

mod expressions;
mod literals;

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

use crate::ast::*;
use crate::error::*;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct TallyParser;

impl TallyParser {
    /// Parse one notepad line
    pub fn parse_line(input: &str) -> ParseResult<Line> {
        let mut pairs = <Self as Parser<Rule>>::parse(Rule::line, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?;

        let whole = Span::new(0, input.len());
        let line_pair = pairs
            .next()
            .ok_or_else(|| ParseError::missing_node("line", whole))?;

        let mut statement = None;
        for pair in line_pair.into_inner() {
            match pair.as_rule() {
                Rule::EOI => {}
                _ => statement = Some(Self::parse_statement(pair)?),
            }
        }

        Ok(Line {
            statement,
            span: whole,
        })
    }

    /// Parse a standalone expression (no assignment allowed)
    pub fn parse_expression(input: &str) -> ParseResult<Expression> {
        let line = Self::parse_line(input)?;
        match line.statement {
            Some(Statement {
                kind: StatementKind::Expression(expression),
                ..
            }) => Ok(expression),
            Some(statement) => Err(ParseError::missing_node("expression", statement.span)),
            None => Err(ParseError::missing_node("expression", line.span)),
        }
    }

    fn parse_statement(pair: Pair<Rule>) -> ParseResult<Statement> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::expression => StatementKind::Expression(Self::parse_expression_from_pair(pair)?),
            Rule::assignment => {
                let mut inner = pair.into_inner();
                let name = Self::parse_identifier(Self::next_pair(&mut inner, "name", span)?);
                let value =
                    Self::parse_expression_from_pair(Self::next_pair(&mut inner, "value", span)?)?;
                StatementKind::Assignment(Assignment { name, value, span })
            }
            Rule::function_assignment => {
                let mut inner = pair.into_inner();
                let name =
                    Self::parse_identifier(Self::next_pair(&mut inner, "function name", span)?);

                let mut parameters = Vec::new();
                let mut body = None;
                for part in inner {
                    match part.as_rule() {
                        Rule::parameter_list => {
                            parameters = part.into_inner().map(Self::parse_identifier).collect();
                        }
                        Rule::expression => body = Some(Self::parse_expression_from_pair(part)?),
                        other => {
                            return Err(ParseError::unexpected_rule(
                                "function body",
                                other,
                                Self::span_from_pair(&part),
                            ));
                        }
                    }
                }

                let body = body.ok_or_else(|| ParseError::missing_node("function body", span))?;
                StatementKind::FunctionAssignment(FunctionAssignment {
                    name,
                    parameters,
                    body,
                    span,
                })
            }
            other => return Err(ParseError::unexpected_rule("statement", other, span)),
        };

        Ok(Statement { kind, span })
    }

    /// Take the next child pair, reporting what was expected when the tree is short
    pub(crate) fn next_pair<'i>(
        pairs: &mut Pairs<'i, Rule>,
        expected: &str,
        span: Span,
    ) -> ParseResult<Pair<'i, Rule>> {
        pairs
            .next()
            .ok_or_else(|| ParseError::missing_node(expected, span))
    }

    pub(crate) fn span_from_pair(pair: &Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }

    pub(crate) fn source_span(span: Span) -> miette::SourceSpan {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}
