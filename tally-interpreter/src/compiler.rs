//! Compilation of parsed lines into evaluable form.
//!
//! Compiling resolves built-in function names and checks their arity once, so
//! a cached line can be re-evaluated on every keystroke without walking the
//! parser AST again.

use crate::builtins::{self, Builtin};
use crate::error::{Result, RuntimeError};
use crate::value::{UserFunction, Value};
use std::rc::Rc;
use tally_parser::{
    BinaryOperator, Expression, ExpressionKind, Line, Span, StatementKind, UnaryOperator,
};

/// A compiled notepad line
#[derive(Debug)]
pub enum CompiledLine {
    /// Blank or comment-only line; evaluates to nothing
    Empty,
    Expression(CompiledExpression),
    Assign {
        name: String,
        value: CompiledExpression,
    },
    DefineFunction(Rc<UserFunction>),
}

/// A compiled expression tree
#[derive(Debug)]
pub enum CompiledExpression {
    Constant(Value),
    Symbol {
        name: String,
        span: Span,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<CompiledExpression>,
        span: Span,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<CompiledExpression>,
        right: Box<CompiledExpression>,
        span: Span,
    },
    CallBuiltin {
        builtin: &'static Builtin,
        arguments: Vec<CompiledExpression>,
        span: Span,
    },
    /// Call resolved through the scope at evaluation time
    CallUser {
        name: String,
        arguments: Vec<CompiledExpression>,
        span: Span,
    },
}

/// Compile a parsed line
pub fn compile_line(line: &Line) -> Result<CompiledLine> {
    let Some(statement) = &line.statement else {
        return Ok(CompiledLine::Empty);
    };

    Ok(match &statement.kind {
        StatementKind::Expression(expression) => {
            CompiledLine::Expression(compile_expression(expression)?)
        }
        StatementKind::Assignment(assignment) => CompiledLine::Assign {
            name: assignment.name.name.clone(),
            value: compile_expression(&assignment.value)?,
        },
        StatementKind::FunctionAssignment(function) => {
            CompiledLine::DefineFunction(Rc::new(UserFunction {
                name: function.name.name.clone(),
                parameters: function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.name.clone())
                    .collect(),
                body: compile_expression(&function.body)?,
            }))
        }
    })
}

/// Compile one expression
pub fn compile_expression(expression: &Expression) -> Result<CompiledExpression> {
    let span = expression.span;

    Ok(match &expression.kind {
        ExpressionKind::Number(number) => CompiledExpression::Constant(Value::Number(number.value)),
        ExpressionKind::String(string) => {
            CompiledExpression::Constant(Value::String(string.value.clone()))
        }
        ExpressionKind::Boolean(boolean) => {
            CompiledExpression::Constant(Value::Boolean(boolean.value))
        }
        ExpressionKind::Identifier(identifier) => CompiledExpression::Symbol {
            name: identifier.name.clone(),
            span,
        },
        ExpressionKind::Parenthesized(inner) => compile_expression(inner)?,
        ExpressionKind::UnaryOp(unary) => CompiledExpression::Unary {
            operator: unary.operator,
            operand: Box::new(compile_expression(&unary.operand)?),
            span,
        },
        ExpressionKind::BinaryOp(binary) => CompiledExpression::Binary {
            operator: binary.operator,
            left: Box::new(compile_expression(&binary.left)?),
            right: Box::new(compile_expression(&binary.right)?),
            span,
        },
        ExpressionKind::FunctionCall(call) => {
            let arguments = call
                .arguments
                .iter()
                .map(compile_expression)
                .collect::<Result<Vec<_>>>()?;

            match builtins::lookup_function(&call.name.name) {
                Some(builtin) => {
                    if !builtin.arity.accepts(arguments.len()) {
                        return Err(RuntimeError::wrong_arity(
                            builtin.name,
                            builtin.arity.describe(),
                            arguments.len(),
                            span,
                        ));
                    }
                    CompiledExpression::CallBuiltin {
                        builtin,
                        arguments,
                        span,
                    }
                }
                None => CompiledExpression::CallUser {
                    name: call.name.name.clone(),
                    arguments,
                    span,
                },
            }
        }
    })
}
