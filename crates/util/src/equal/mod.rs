//! Deep equality.
//!
//! Structural comparison of arbitrary values with custom `equals` hooks,
//! cycle safety and an optional descriptor-level strict mode.

mod collections;
mod deep_equal;

pub use deep_equal::{deep_equal, deep_equal_strict, try_deep_equal};
