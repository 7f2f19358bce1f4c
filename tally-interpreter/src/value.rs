//! Runtime value representation for the Tally interpreter.
//!
//! This module defines the Value enum that represents every result a notepad
//! line can produce, along with the arithmetic, comparison and display
//! operations the evaluator and the summation blocks rely on.

use crate::compiler::CompiledExpression;
use crate::error::{Result, RuntimeError};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Runtime values in the Tally interpreter
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit floating point number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// UTF-8 string
    String(String),
    /// User-defined function, e.g. `area(w, h) = w * h`
    Function(Rc<UserFunction>),
}

/// A function defined on a notepad line
#[derive(Debug)]
pub struct UserFunction {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: CompiledExpression,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Function(_) => "function",
        }
    }

    /// Numeric view of the value; booleans count as 0 and 1
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    // Arithmetic operations

    /// Addition: numeric, or string concatenation
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            _ => self.numeric("+", other, |a, b| a + b),
        }
    }

    /// Subtraction operation
    pub fn subtract(&self, other: &Value) -> Result<Value> {
        self.numeric("-", other, |a, b| a - b)
    }

    /// Multiplication operation
    pub fn multiply(&self, other: &Value) -> Result<Value> {
        self.numeric("*", other, |a, b| a * b)
    }

    /// Division; dividing by zero yields an infinity, as in floating point
    pub fn divide(&self, other: &Value) -> Result<Value> {
        self.numeric("/", other, |a, b| a / b)
    }

    /// Floored modulo, so the sign follows the divisor
    pub fn modulo(&self, other: &Value) -> Result<Value> {
        self.numeric("%", other, |a, b| {
            if b == 0.0 { a } else { a - b * (a / b).floor() }
        })
    }

    /// Exponentiation operation
    pub fn power(&self, other: &Value) -> Result<Value> {
        self.numeric("^", other, f64::powf)
    }

    /// Unary negation
    pub fn negate(&self) -> Result<Value> {
        self.as_number()
            .map(|n| Value::Number(-n))
            .ok_or_else(|| RuntimeError::invalid_operation("unary -", &[self.type_name()]))
    }

    /// Unary plus converts booleans to numbers
    pub fn unary_plus(&self) -> Result<Value> {
        self.as_number()
            .map(Value::Number)
            .ok_or_else(|| RuntimeError::invalid_operation("unary +", &[self.type_name()]))
    }

    /// Factorial of a non-negative integer
    pub fn factorial(&self) -> Result<Value> {
        let n = self
            .as_number()
            .ok_or_else(|| RuntimeError::invalid_operation("!", &[self.type_name()]))?;

        if n < 0.0 || n.fract() != 0.0 {
            return Err(RuntimeError::InvalidFactorial {
                value: self.to_string(),
                span: None,
            });
        }

        // 171! overflows f64, so the loop stops there
        let mut product: f64 = 1.0;
        let mut i = 2.0;
        while i <= n && product.is_finite() {
            product *= i;
            i += 1.0;
        }
        Ok(Value::Number(product))
    }

    // Comparison operations

    pub fn equals(&self, other: &Value) -> Value {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => Value::Boolean(a == b),
            _ => Value::Boolean(self == other),
        }
    }

    pub fn not_equals(&self, other: &Value) -> Value {
        match self.equals(other) {
            Value::Boolean(equal) => Value::Boolean(!equal),
            other => other,
        }
    }

    /// Ordering comparison, numbers by value and strings lexically
    pub fn compare(&self, operation: &str, other: &Value, accept: fn(Ordering) -> bool) -> Result<Value> {
        let ordering = match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => {
                    return Err(RuntimeError::invalid_operation(
                        operation,
                        &[self.type_name(), other.type_name()],
                    ));
                }
            },
        };

        // NaN compares false against everything
        Ok(Value::Boolean(ordering.is_some_and(accept)))
    }

    fn numeric(&self, operation: &str, other: &Value, apply: impl Fn(f64, f64) -> f64) -> Result<Value> {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => Ok(Value::Number(apply(a, b))),
            _ => Err(RuntimeError::invalid_operation(
                operation,
                &[self.type_name(), other.type_name()],
            )),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Function(function) => {
                write!(f, "{}({})", function.name, function.parameters.join(", "))
            }
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
