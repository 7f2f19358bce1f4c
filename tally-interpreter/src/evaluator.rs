//! Expression evaluator for compiled notepad lines
//!
//! Evaluates a `CompiledLine` against the scope of the current pass. Only
//! top-level assignments and function definitions write to the scope; calls
//! to user functions run in a copy of the caller's scope with the parameters
//! bound on top.

use crate::compiler::{CompiledExpression, CompiledLine};
use crate::error::{Result, RuntimeError};
use crate::scope::Scope;
use crate::value::Value;
use crate::builtins;
use std::cmp::Ordering;
use std::rc::Rc;
use tally_parser::{BinaryOperator, UnaryOperator};

/// Default limit on nested user function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100;

/// Evaluator for compiled lines
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    max_call_depth: usize,
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self { max_call_depth }
    }

    /// Evaluate a compiled line, binding assignments into `scope`
    ///
    /// Returns `Ok(None)` for blank and comment-only lines.
    pub fn evaluate_line(&self, line: &CompiledLine, scope: &mut Scope) -> Result<Option<Value>> {
        match line {
            CompiledLine::Empty => Ok(None),
            CompiledLine::Expression(expression) => self.evaluate(expression, scope, 0).map(Some),
            CompiledLine::Assign { name, value } => {
                let value = self.evaluate(value, scope, 0)?;
                scope.set(name.clone(), value.clone());
                Ok(Some(value))
            }
            CompiledLine::DefineFunction(function) => {
                let value = Value::Function(Rc::clone(function));
                scope.set(function.name.clone(), value.clone());
                Ok(Some(value))
            }
        }
    }

    /// Evaluate a compiled expression without modifying the scope
    pub fn evaluate(&self, expression: &CompiledExpression, scope: &Scope, depth: usize) -> Result<Value> {
        match expression {
            CompiledExpression::Constant(value) => Ok(value.clone()),

            CompiledExpression::Symbol { name, span } => {
                if let Some(value) = scope.get(name) {
                    return Ok(value.clone());
                }
                builtins::lookup_constant(name)
                    .map(Value::Number)
                    .ok_or_else(|| RuntimeError::undefined_symbol(name, *span))
            }

            CompiledExpression::Unary {
                operator,
                operand,
                span,
            } => {
                let operand = self.evaluate(operand, scope, depth)?;
                match operator {
                    UnaryOperator::Minus => operand.negate(),
                    UnaryOperator::Plus => operand.unary_plus(),
                    UnaryOperator::Factorial => operand.factorial(),
                }
                .map_err(|error| error.with_span(*span))
            }

            CompiledExpression::Binary {
                operator,
                left,
                right,
                span,
            } => {
                let left = self.evaluate(left, scope, depth)?;
                let right = self.evaluate(right, scope, depth)?;
                Self::apply_binary(*operator, &left, &right).map_err(|error| error.with_span(*span))
            }

            CompiledExpression::CallBuiltin {
                builtin,
                arguments,
                span,
            } => {
                let mut numbers = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    let value = self.evaluate(argument, scope, depth)?;
                    let number = value.as_number().ok_or_else(|| {
                        RuntimeError::invalid_operation(builtin.name, &[value.type_name()])
                            .with_span(*span)
                    })?;
                    numbers.push(number);
                }
                Ok(Value::Number(builtin.call(&numbers)))
            }

            CompiledExpression::CallUser {
                name,
                arguments,
                span,
            } => {
                let function = match scope.get(name) {
                    Some(Value::Function(function)) => Rc::clone(function),
                    Some(_) => return Err(RuntimeError::not_a_function(name, *span)),
                    None => return Err(RuntimeError::undefined_function(name, *span)),
                };

                if function.parameters.len() != arguments.len() {
                    return Err(RuntimeError::wrong_arity(
                        name,
                        function.parameters.len().to_string(),
                        arguments.len(),
                        *span,
                    ));
                }

                if depth >= self.max_call_depth {
                    return Err(RuntimeError::RecursionLimit {
                        max_depth: self.max_call_depth,
                    });
                }

                let mut call_scope = scope.clone();
                for (parameter, argument) in function.parameters.iter().zip(arguments) {
                    let value = self.evaluate(argument, scope, depth)?;
                    call_scope.set(parameter.clone(), value);
                }

                tracing::trace!(function = %name, depth, "calling user function");
                self.evaluate(&function.body, &call_scope, depth + 1)
            }
        }
    }

    fn apply_binary(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value> {
        match operator {
            BinaryOperator::Add => left.add(right),
            BinaryOperator::Subtract => left.subtract(right),
            BinaryOperator::Multiply => left.multiply(right),
            BinaryOperator::Divide => left.divide(right),
            BinaryOperator::Modulo => left.modulo(right),
            BinaryOperator::Exponent => left.power(right),
            BinaryOperator::Equal => Ok(left.equals(right)),
            BinaryOperator::NotEqual => Ok(left.not_equals(right)),
            BinaryOperator::Less => left.compare("<", right, Ordering::is_lt),
            BinaryOperator::LessEqual => left.compare("<=", right, Ordering::is_le),
            BinaryOperator::Greater => left.compare(">", right, Ordering::is_gt),
            BinaryOperator::GreaterEqual => left.compare(">=", right, Ordering::is_ge),
        }
    }
}
