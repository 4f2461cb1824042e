//! replica-util - Deep equality and deep cloning
//!
//! Generic structural comparison and copying over [`replica_value::Value`]
//! graphs. Values can override either operation through capability hooks
//! (see [`capability`]); cycles and shared references are handled without
//! recursion on the call stack.
//!
//! # Example
//!
//! ```
//! use replica_util::{deep_clone, deep_equal};
//! use replica_value::Value;
//!
//! let node = Value::record([("id", Value::from(1))]);
//! node.as_object().unwrap().set("self", node.clone());
//!
//! let copy = deep_clone(&node).unwrap();
//! assert!(deep_equal(&node, &copy));
//!
//! let inner = copy.as_object().unwrap().get("self").unwrap();
//! assert!(inner.as_object().unwrap().ptr_eq(copy.as_object().unwrap()));
//! ```

pub mod capability;
pub mod clone;
pub mod equal;
pub mod error;
pub mod fuzzer;
pub mod has_own_property;
pub mod is_empty;
pub mod options;
pub mod same_value;

// Re-exports for convenience
pub use capability::{has_method, implements_deep_clone, implements_equals};
pub use clone::{deep_clone, deep_clone_with};
pub use equal::{deep_equal, deep_equal_strict, try_deep_equal};
pub use error::Error;
pub use fuzzer::Fuzzer;
pub use has_own_property::has_own_property;
pub use is_empty::is_empty;
pub use options::{CloneOptions, Comparison, EqualOptions};
pub use same_value::{same_value_strict, same_value_zero};
