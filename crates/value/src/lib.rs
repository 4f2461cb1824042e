//! replica-value - Dynamic runtime values
//!
//! The value model the replica engines operate on: primitives, symbols,
//! callables carrying arity and source text, and shared reference objects
//! drawn from a closed set of shapes (record, list, map, set, date, regular
//! expression) plus opaque Rust-native host objects.
//!
//! # Example
//!
//! ```
//! use replica_value::Value;
//!
//! let point = Value::record([("x", Value::from(1)), ("y", Value::from(2))]);
//! let handle = point.as_object().unwrap();
//!
//! handle.set("x", 10);
//! assert_eq!(handle.get("x").and_then(|v| v.as_f64()), Some(10.0));
//!
//! // `Clone` shares the object.
//! let alias = point.clone();
//! assert!(alias.as_object().unwrap().ptr_eq(handle));
//! ```

pub mod collections;
pub mod error;
pub mod function;
pub mod host;
pub mod json;
pub mod key;
pub mod object;
pub mod proto;
pub mod regexp;
pub mod value;

// Re-exports for convenience
pub use collections::{MapKey, ValueMap, ValueSet};
pub use error::Error;
pub use function::{Function, NativeFn};
pub use host::{DeepCloneable, Equatable, HostObject};
pub use key::{PropertyKey, Symbol};
pub use object::{ObjRef, Object, ObjectKind, Property};
pub use proto::Proto;
pub use regexp::RegExp;
pub use value::Value;
