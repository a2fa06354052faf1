//! Error types for operator evaluation and per-key degradation reporting.
//!
//! Nothing here escapes a combine call as a `Result`: every failure is
//! resolved to a `Value::Null` entry for the affected key, and surfaced, at
//! most, as a [`DegradeReason`] in the combine report.

use thiserror::Error;

use crate::zero::ValueCategory;

/// Failures raised while evaluating an operator on one pair of values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OpError {
    /// The operator is not applicable to this pairing of value categories.
    #[error("{op} is not applicable to {lhs} and {rhs}")]
    Incompatible {
        op: &'static str,
        lhs: ValueCategory,
        rhs: ValueCategory,
    },

    /// Checked integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },

    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The float result is NaN or infinite and cannot be stored as a number.
    #[error("result is not representable as a number")]
    NonFinite,

    /// A custom operator reported a failure.
    #[error("custom operator failed: {0}")]
    Custom(String),
}

impl OpError {
    /// Build a custom-operator failure from any message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Why a key's combined value degraded to `Value::Null`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DegradeReason {
    /// The operator failed on the paired values.
    #[error(transparent)]
    Operator(#[from] OpError),

    /// The key was present on one side only, the present value's category
    /// has no zero to stand in for the absent side, and the operator is not
    /// the default addition (which would have kept the value unchanged).
    #[error("no zero value for {category} values")]
    NoZeroValue { category: ValueCategory },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_message_names_both_categories() {
        let err = OpError::Incompatible {
            op: "add",
            lhs: ValueCategory::Null,
            rhs: ValueCategory::Number,
        };
        assert_eq!(err.to_string(), "add is not applicable to null and number");
    }

    #[test]
    fn operator_reason_is_transparent() {
        let reason = DegradeReason::from(OpError::DivisionByZero);
        assert_eq!(reason.to_string(), "division by zero");
    }

    #[test]
    fn custom_helper_wraps_message() {
        let err = OpError::custom("modulo of zero-length cycle");
        assert_eq!(
            err.to_string(),
            "custom operator failed: modulo of zero-length cycle"
        );
    }
}
