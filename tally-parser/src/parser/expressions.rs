// Expression parsing module
// Handles operator precedence, unary/postfix operators and primary expressions

use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, TallyParser};

impl TallyParser {
    /// Operator precedence parser
    /// Precedence levels from lowest to highest
    pub(crate) fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            // Level 1: Equality and comparison
            .op(Op::infix(Rule::op_equal, Assoc::Left)
                | Op::infix(Rule::op_not_equal, Assoc::Left)
                | Op::infix(Rule::op_less, Assoc::Left)
                | Op::infix(Rule::op_less_equal, Assoc::Left)
                | Op::infix(Rule::op_greater, Assoc::Left)
                | Op::infix(Rule::op_greater_equal, Assoc::Left))
            // Level 2: Additive
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_subtract, Assoc::Left))
            // Level 3: Multiplicative
            .op(Op::infix(Rule::op_multiply, Assoc::Left)
                | Op::infix(Rule::op_divide, Assoc::Left)
                | Op::infix(Rule::op_modulo, Assoc::Left))
            // Level 4: Unary sign (so -2^2 is -(2^2))
            .op(Op::prefix(Rule::op_unary_minus) | Op::prefix(Rule::op_unary_plus))
            // Level 5: Exponentiation, right associative
            .op(Op::infix(Rule::op_exponent, Assoc::Right))
            // Level 6: Factorial
            .op(Op::postfix(Rule::op_factorial))
    }

    /// Parse an `expression` pair
    pub(crate) fn parse_expression_from_pair(pair: Pair<Rule>) -> ParseResult<Expression> {
        match pair.as_rule() {
            Rule::expression => Self::parse_expression_with_precedence(pair.into_inner()),
            _ => Self::parse_primary(pair),
        }
    }

    fn parse_expression_with_precedence(pairs: Pairs<Rule>) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(Self::parse_primary)
            .map_prefix(|op: Pair<Rule>, operand: ParseResult<Expression>| {
                let operand = operand?;
                let operator = match op.as_rule() {
                    Rule::op_unary_minus => UnaryOperator::Minus,
                    Rule::op_unary_plus => UnaryOperator::Plus,
                    other => {
                        return Err(ParseError::unexpected_rule(
                            "prefix operator",
                            other,
                            Self::span_from_pair(&op),
                        ));
                    }
                };
                let span = Span::new(op.as_span().start(), operand.span.end);
                Ok(Self::unary(operator, operand, span))
            })
            .map_postfix(|operand: ParseResult<Expression>, op: Pair<Rule>| {
                let operand = operand?;
                let operator = match op.as_rule() {
                    Rule::op_factorial => UnaryOperator::Factorial,
                    other => {
                        return Err(ParseError::unexpected_rule(
                            "postfix operator",
                            other,
                            Self::span_from_pair(&op),
                        ));
                    }
                };
                let span = Span::new(operand.span.start, op.as_span().end());
                Ok(Self::unary(operator, operand, span))
            })
            .map_infix(
                |left: ParseResult<Expression>, op: Pair<Rule>, right: ParseResult<Expression>| {
                    let left = left?;
                    let right = right?;

                    let operator = match op.as_rule() {
                        Rule::op_equal => BinaryOperator::Equal,
                        Rule::op_not_equal => BinaryOperator::NotEqual,
                        Rule::op_less => BinaryOperator::Less,
                        Rule::op_less_equal => BinaryOperator::LessEqual,
                        Rule::op_greater => BinaryOperator::Greater,
                        Rule::op_greater_equal => BinaryOperator::GreaterEqual,
                        Rule::op_add => BinaryOperator::Add,
                        Rule::op_subtract => BinaryOperator::Subtract,
                        Rule::op_multiply => BinaryOperator::Multiply,
                        Rule::op_divide => BinaryOperator::Divide,
                        Rule::op_modulo => BinaryOperator::Modulo,
                        Rule::op_exponent => BinaryOperator::Exponent,
                        other => {
                            return Err(ParseError::unexpected_rule(
                                "binary operator",
                                other,
                                Self::span_from_pair(&op),
                            ));
                        }
                    };

                    let span = Span::new(left.span.start, right.span.end);
                    Ok(Expression {
                        kind: ExpressionKind::BinaryOp(BinaryOperation {
                            left: Box::new(left),
                            operator,
                            right: Box::new(right),
                            span,
                        }),
                        span,
                    })
                },
            )
            .parse(pairs)
    }

    /// Parse a primary expression: literal, name, call or parenthesized expression
    fn parse_primary(pair: Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::number_decimal | Rule::number_hexadecimal => {
                ExpressionKind::Number(Self::parse_number(pair)?)
            }
            Rule::string => ExpressionKind::String(Self::parse_string(pair)?),
            Rule::boolean_true | Rule::boolean_false => {
                ExpressionKind::Boolean(Self::parse_boolean(pair))
            }
            Rule::identifier => ExpressionKind::Identifier(Self::parse_identifier(pair)),
            Rule::function_call => ExpressionKind::FunctionCall(Self::parse_function_call(pair)?),
            Rule::parenthesized => {
                let mut inner = pair.into_inner();
                let expression = Self::next_pair(&mut inner, "expression", span)?;
                ExpressionKind::Parenthesized(Box::new(Self::parse_expression_from_pair(
                    expression,
                )?))
            }
            other => return Err(ParseError::unexpected_rule("expression", other, span)),
        };

        Ok(Expression { kind, span })
    }

    fn parse_function_call(pair: Pair<Rule>) -> ParseResult<FunctionCall> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, "function name", span)?);

        let mut arguments = Vec::new();
        if let Some(argument_list) = inner.next() {
            for argument in argument_list.into_inner() {
                arguments.push(Self::parse_expression_from_pair(argument)?);
            }
        }

        Ok(FunctionCall {
            name,
            arguments,
            span,
        })
    }

    fn unary(operator: UnaryOperator, operand: Expression, span: Span) -> Expression {
        Expression {
            kind: ExpressionKind::UnaryOp(UnaryOperation {
                operator,
                operand: Box::new(operand),
                span,
            }),
            span,
        }
    }
}
