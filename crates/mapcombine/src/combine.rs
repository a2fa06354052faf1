//! Value-wise combination of two mappings.
//!
//! [`combine`] walks the union of the two key sets and applies the operator
//! to values sharing a key. One-sided keys resolve through a fallback chain:
//! zero substitution first, then the additive identity, then degradation to
//! null. The output preserves key order whenever either input is
//! order-preserving.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::error::DegradeReason;
use crate::mapping::Mapping;
use crate::op::CombineOp;
use crate::zero::{zero_value, ValueCategory};

/// The merged mapping produced by a combine call.
///
/// `Ordered` is produced whenever either input preserves order and iterates
/// in combined key order: the lead input's keys first, then the residual
/// keys of the other input. `Unordered` makes no insertion-order claim (it
/// happens to iterate sorted).
#[derive(Clone, Debug, PartialEq)]
pub enum CombinedMap {
    /// Order-preserving result.
    Ordered(IndexMap<String, Value>),
    /// Result with no insertion-order guarantee.
    Unordered(BTreeMap<String, Value>),
}

impl CombinedMap {
    /// Look up a combined value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Ordered(map) => map.get(key),
            Self::Unordered(map) => map.get(key),
        }
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Ordered(map) => map.len(),
            Self::Unordered(map) => map.len(),
        }
    }

    /// Whether the result has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether iteration order follows the combined key order.
    pub fn is_order_preserving(&self) -> bool {
        matches!(self, Self::Ordered(_))
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Ordered(map) => Box::new(map.keys().map(String::as_str)),
            Self::Unordered(map) => Box::new(map.keys().map(String::as_str)),
        }
    }

    /// Entries in iteration order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Self::Ordered(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v))),
            Self::Unordered(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v))),
        }
    }

    fn insert(&mut self, key: String, value: Value) {
        match self {
            Self::Ordered(map) => {
                map.insert(key, value);
            }
            Self::Unordered(map) => {
                map.insert(key, value);
            }
        }
    }
}

// A combine result is itself a valid input, so pairwise calls can be
// chained by hand.
impl Mapping for CombinedMap {
    fn is_order_preserving(&self) -> bool {
        CombinedMap::is_order_preserving(self)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        CombinedMap::get(self, key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        CombinedMap::keys(self)
    }

    fn len(&self) -> usize {
        CombinedMap::len(self)
    }
}

// Serializes as a plain object; the `Ordered` variant emits keys in
// combined order. `Deserialize` is deliberately absent: an object alone
// does not say which variant it should become.
impl Serialize for CombinedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Ordered(map) => map.serialize(serializer),
            Self::Unordered(map) => map.serialize(serializer),
        }
    }
}

/// One key whose combined value degraded to `Value::Null`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Degradation {
    /// The affected key.
    pub key: String,
    /// Why the value degraded.
    pub reason: DegradeReason,
}

/// Per-key degradation annotations for one combine call.
///
/// An entry exists exactly for the keys whose stored value is a degraded
/// `Value::Null`. The additive-identity fallback is a clean resolution and
/// is never reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombineReport {
    /// The list of degradations, in combined key order.
    pub degradations: Vec<Degradation>,
}

impl CombineReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no key degraded.
    pub fn is_empty(&self) -> bool {
        self.degradations.is_empty()
    }

    /// Number of degraded keys.
    pub fn len(&self) -> usize {
        self.degradations.len()
    }

    /// The degraded keys, in combined key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.degradations.iter().map(|d| d.key.as_str())
    }

    /// The degradations, in combined key order.
    pub fn iter(&self) -> impl Iterator<Item = &Degradation> {
        self.degradations.iter()
    }

    /// The reason one key degraded, if it did.
    pub fn reason(&self, key: &str) -> Option<&DegradeReason> {
        self.degradations
            .iter()
            .find(|d| d.key == key)
            .map(|d| &d.reason)
    }
}

/// Combine two mappings with the default addition operator.
///
/// Shorthand for [`combine_with`] with [`CombineOp::Add`].
pub fn combine(a: &dyn Mapping, b: &dyn Mapping) -> CombinedMap {
    combine_with(a, b, &CombineOp::Add)
}

/// Combine two mappings by applying `op` to values sharing a key.
///
/// The output covers the union of the two key sets and never fails:
/// - both sides present → `op(a_val, b_val)`; operator failures store
///   `Value::Null` for that key only;
/// - one side present → the absent side is stood in for by the zero of the
///   present value's category (`0`, `""`, `[]`) when it has one; without a
///   zero, the default addition keeps the present value unchanged and any
///   other operator stores `Value::Null`.
///
/// The inputs are never mutated. If either input is order-preserving the
/// result is [`CombinedMap::Ordered`], led by the order-preserving input's
/// key sequence (`a` leads when both are).
pub fn combine_with(a: &dyn Mapping, b: &dyn Mapping, op: &CombineOp) -> CombinedMap {
    combine_with_report(a, b, op).0
}

/// [`combine_with`], plus a report of the keys that degraded to null.
///
/// The report is an annotation only; the merged result is identical to
/// what [`combine_with`] returns.
pub fn combine_with_report(
    a: &dyn Mapping,
    b: &dyn Mapping,
    op: &CombineOp,
) -> (CombinedMap, CombineReport) {
    let ordered = a.is_order_preserving() || b.is_order_preserving();

    // The order-preserving side supplies the lead key sequence; `a` leads
    // when both or neither preserve order. Only the key sequences swap,
    // never the operand roles: `op(a_val, b_val)` keeps `a` on the left.
    let (lead, other): (&dyn Mapping, &dyn Mapping) =
        if b.is_order_preserving() && !a.is_order_preserving() {
            (b, a)
        } else {
            (a, b)
        };

    let mut all_keys: IndexSet<&str> = lead.keys().collect();
    all_keys.extend(other.keys());

    let mut out = if ordered {
        CombinedMap::Ordered(IndexMap::with_capacity(all_keys.len()))
    } else {
        CombinedMap::Unordered(BTreeMap::new())
    };
    let mut report = CombineReport::new();

    for key in all_keys {
        let (value, degraded) = combine_entry(a.get(key), b.get(key), op);
        if let Some(reason) = degraded {
            debug!(key, reason = %reason, "combined value degraded to null");
            report.degradations.push(Degradation {
                key: key.to_string(),
                reason,
            });
        }
        out.insert(key.to_string(), value);
    }

    debug!(
        keys = out.len(),
        degraded = report.len(),
        ordered,
        op = op.name(),
        "combined mappings"
    );

    (out, report)
}

/// Resolve one key of the union.
fn combine_entry(
    a_val: Option<&Value>,
    b_val: Option<&Value>,
    op: &CombineOp,
) -> (Value, Option<DegradeReason>) {
    match (a_val, b_val) {
        (Some(a), Some(b)) => apply_or_degrade(op, a, b),
        // The zero stands in for the absent side, so it keeps that side's
        // operand position.
        (None, Some(b)) => match zero_value(b) {
            Some(zero) => apply_or_degrade(op, &zero, b),
            None => one_sided_fallback(b, op),
        },
        (Some(a), None) => match zero_value(a) {
            Some(zero) => apply_or_degrade(op, a, &zero),
            None => one_sided_fallback(a, op),
        },
        // Keys come from the union of the two key sets.
        (None, None) => unreachable!("key absent from both mappings"),
    }
}

fn apply_or_degrade(op: &CombineOp, lhs: &Value, rhs: &Value) -> (Value, Option<DegradeReason>) {
    match op.apply(lhs, rhs) {
        Ok(value) => (value, None),
        Err(err) => (Value::Null, Some(DegradeReason::Operator(err))),
    }
}

/// A one-sided key whose value category has no zero: addition keeps the
/// present value unchanged (combining it with nothing is the identity);
/// any other operator degrades to null.
fn one_sided_fallback(present: &Value, op: &CombineOp) -> (Value, Option<DegradeReason>) {
    if op.is_additive() {
        (present.clone(), None)
    } else {
        (
            Value::Null,
            Some(DegradeReason::NoZeroValue {
                category: ValueCategory::of(present),
            }),
        )
    }
}
