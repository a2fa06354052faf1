//! The binary operator applied to the pair of values under one key.
//!
//! Built-in operators cover arithmetic plus additive concatenation for text
//! and sequences; anything else can be passed as a custom callable.
//! Applicability is same-category only; the single coercion is int/float
//! numeric promotion. Failures never escape a combine call; the combiner
//! degrades the affected key to `Value::Null`.

use std::fmt;

use serde_json::{Number, Value};

use crate::error::OpError;
use crate::zero::ValueCategory;

/// Signature of a caller-supplied operator.
pub type CustomFn = dyn Fn(&Value, &Value) -> Result<Value, OpError> + Send + Sync;

/// The binary operator used to combine the two values under one key.
pub enum CombineOp {
    /// Numeric addition; concatenation for text and sequences. The default.
    Add,
    /// Numeric subtraction.
    Subtract,
    /// Numeric multiplication.
    Multiply,
    /// Numeric true division, carried out in `f64`.
    Divide,
    /// A caller-supplied operator. Its failures degrade like any other.
    Custom(Box<CustomFn>),
}

impl CombineOp {
    /// Wrap a closure as a custom operator.
    pub fn custom<F>(op: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, OpError> + Send + Sync + 'static,
    {
        Self::Custom(Box::new(op))
    }

    /// Whether this is the default addition operator.
    ///
    /// Only addition gets the identity fallback for one-sided keys whose
    /// value category has no zero. A custom operator is never additive,
    /// even if the closure happens to implement an addition.
    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Add)
    }

    /// Short operator name for messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Custom(_) => "custom",
        }
    }

    /// Apply the operator to one pair of values.
    pub fn apply(&self, lhs: &Value, rhs: &Value) -> Result<Value, OpError> {
        match self {
            Self::Custom(op) => op(lhs, rhs),
            Self::Add => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => {
                    numbers("add", a, b, i64::checked_add, |x, y| x + y)
                }
                (Value::String(a), Value::String(b)) => {
                    let mut joined = String::with_capacity(a.len() + b.len());
                    joined.push_str(a);
                    joined.push_str(b);
                    Ok(Value::String(joined))
                }
                (Value::Array(a), Value::Array(b)) => {
                    let mut joined = Vec::with_capacity(a.len() + b.len());
                    joined.extend_from_slice(a);
                    joined.extend_from_slice(b);
                    Ok(Value::Array(joined))
                }
                _ => Err(self.incompatible(lhs, rhs)),
            },
            Self::Subtract => self.numbers_only(lhs, rhs, i64::checked_sub, |x, y| x - y),
            Self::Multiply => self.numbers_only(lhs, rhs, i64::checked_mul, |x, y| x * y),
            Self::Divide => match (lhs, rhs) {
                (Value::Number(a), Value::Number(b)) => divide(a, b),
                _ => Err(self.incompatible(lhs, rhs)),
            },
        }
    }

    fn numbers_only(
        &self,
        lhs: &Value,
        rhs: &Value,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value, OpError> {
        match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => {
                numbers(self.name(), a, b, int_op, float_op)
            }
            _ => Err(self.incompatible(lhs, rhs)),
        }
    }

    fn incompatible(&self, lhs: &Value, rhs: &Value) -> OpError {
        OpError::Incompatible {
            op: self.name(),
            lhs: ValueCategory::of(lhs),
            rhs: ValueCategory::of(rhs),
        }
    }
}

impl Default for CombineOp {
    fn default() -> Self {
        Self::Add
    }
}

impl fmt::Debug for CombineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("Add"),
            Self::Subtract => f.write_str("Subtract"),
            Self::Multiply => f.write_str("Multiply"),
            Self::Divide => f.write_str("Divide"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Evaluate one arithmetic operation on a pair of numbers.
///
/// Pairs that both fit in `i64` use checked integer arithmetic; everything
/// else is evaluated in `f64`. Non-finite results degrade because they have
/// no number encoding.
fn numbers(
    op: &'static str,
    lhs: &Number,
    rhs: &Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, OpError> {
    if let (Some(a), Some(b)) = (lhs.as_i64(), rhs.as_i64()) {
        return int_op(a, b).map(Value::from).ok_or(OpError::Overflow { op });
    }
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => finite(float_op(a, b)),
        _ => Err(OpError::NonFinite),
    }
}

/// True division, always in `f64`.
fn divide(lhs: &Number, rhs: &Number) -> Result<Value, OpError> {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => {
            if b == 0.0 {
                Err(OpError::DivisionByZero)
            } else {
                finite(a / b)
            }
        }
        _ => Err(OpError::NonFinite),
    }
}

/// A finite `f64` as a JSON number.
fn finite(x: f64) -> Result<Value, OpError> {
    Number::from_f64(x)
        .map(Value::Number)
        .ok_or(OpError::NonFinite)
}
