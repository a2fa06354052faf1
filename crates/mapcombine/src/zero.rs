//! Value categories and the zero-value table.
//!
//! When a key is present on only one side of a combine, the absent side is
//! stood in for by the zero of the present value's category: `0` for
//! numbers, `""` for text, `[]` for sequences. Null, bool, and composite
//! values have no zero; keys carrying those resolve through the
//! identity-or-null fallback instead.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The category of a value, as seen by the zero-value table and by
/// operator applicability checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueCategory {
    /// A null value. Distinct from an absent key.
    Null,
    /// `true` or `false`.
    Bool,
    /// An integer or float.
    Number,
    /// A string.
    Text,
    /// An array. Elements are opaque to the combiner.
    Sequence,
    /// An object. Never merged recursively.
    Composite,
}

impl ValueCategory {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::Text,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Composite,
        }
    }

    /// The zero value for this category, if it has one.
    ///
    /// This is the entire default table. Categories outside it have no
    /// nullary construction; one-sided keys carrying them fall back to the
    /// present value under addition and to `Value::Null` under any other
    /// operator.
    pub fn zero(&self) -> Option<Value> {
        match self {
            Self::Number => Some(json!(0)),
            Self::Text => Some(json!("")),
            Self::Sequence => Some(json!([])),
            Self::Null | Self::Bool | Self::Composite => None,
        }
    }
}

impl std::fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::Text => write!(f, "text"),
            Self::Sequence => write!(f, "sequence"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// The zero value standing in for an absent operand, derived from the
/// value present on the other side.
pub fn zero_value(present: &Value) -> Option<Value> {
    ValueCategory::of(present).zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_category() {
        assert_eq!(ValueCategory::of(&json!(null)), ValueCategory::Null);
        assert_eq!(ValueCategory::of(&json!(true)), ValueCategory::Bool);
        assert_eq!(ValueCategory::of(&json!(7)), ValueCategory::Number);
        assert_eq!(ValueCategory::of(&json!(2.5)), ValueCategory::Number);
        assert_eq!(ValueCategory::of(&json!("hi")), ValueCategory::Text);
        assert_eq!(ValueCategory::of(&json!([1, 2])), ValueCategory::Sequence);
        assert_eq!(ValueCategory::of(&json!({"a": 1})), ValueCategory::Composite);
    }

    #[test]
    fn zero_table_covers_defaultable_categories() {
        assert_eq!(zero_value(&json!(41)), Some(json!(0)));
        assert_eq!(zero_value(&json!(2.5)), Some(json!(0)));
        assert_eq!(zero_value(&json!("hello")), Some(json!("")));
        assert_eq!(zero_value(&json!([1, 2, 3])), Some(json!([])));
    }

    #[test]
    fn null_bool_composite_have_no_zero() {
        assert_eq!(zero_value(&json!(null)), None);
        assert_eq!(zero_value(&json!(false)), None);
        assert_eq!(zero_value(&json!({"nested": true})), None);
    }

    #[test]
    fn display_names_are_lowercase() {
        assert_eq!(ValueCategory::Null.to_string(), "null");
        assert_eq!(ValueCategory::Bool.to_string(), "bool");
        assert_eq!(ValueCategory::Number.to_string(), "number");
        assert_eq!(ValueCategory::Text.to_string(), "text");
        assert_eq!(ValueCategory::Sequence.to_string(), "sequence");
        assert_eq!(ValueCategory::Composite.to_string(), "composite");
    }
}
