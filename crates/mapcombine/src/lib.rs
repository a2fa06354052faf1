//! Value-wise combination of key/value mappings.
//!
//! Merges two mappings over the union of their keys, applying an operator
//! (addition by default) to values sharing a key and substituting a typed
//! zero for the missing side of one-sided keys. A combine call never fails:
//! keys whose values cannot be combined degrade to `Value::Null` and the
//! rest of the result is unaffected.
//!
//! # Key Types
//!
//! - [`combine()`] / [`combine_with`] / [`combine_with_report`] -- Entry points
//! - [`Mapping`] -- Input abstraction over ordered and unordered maps
//! - [`CombineOp`] -- Builtin arithmetic operators plus custom closures
//! - [`CombinedMap`] -- Merged output (ordered or unordered)
//! - [`CombineReport`] / [`Degradation`] -- Per-key degradation annotations
//! - [`OpError`] / [`DegradeReason`] -- Why a key degraded to null
//!
//! # Quick Start
//!
//! ```rust
//! use indexmap::IndexMap;
//! use mapcombine::combine;
//! use serde_json::{json, Value};
//!
//! let a: IndexMap<String, Value> =
//!     [("x".into(), json!(1)), ("y".into(), json!(2))].into_iter().collect();
//! let b: IndexMap<String, Value> =
//!     [("y".into(), json!(3)), ("z".into(), json!(4))].into_iter().collect();
//!
//! let out = combine(&a, &b);
//! assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"x":1,"y":5,"z":4}"#);
//! ```

pub mod combine;
pub mod error;
pub mod mapping;
pub mod op;
pub mod zero;

// Re-exports for convenience.
pub use combine::{
    combine, combine_with, combine_with_report, CombineReport, CombinedMap, Degradation,
};
pub use error::{DegradeReason, OpError};
pub use mapping::Mapping;
pub use op::{CombineOp, CustomFn};
pub use zero::{zero_value, ValueCategory};
