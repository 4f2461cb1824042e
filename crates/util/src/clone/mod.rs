//! Deep cloning.
//!
//! Produces independent copies of arbitrary values, honoring custom
//! `deepClone` hooks and preserving cycles and shared references.

mod deep_clone;

pub use deep_clone::{deep_clone, deep_clone_with};
