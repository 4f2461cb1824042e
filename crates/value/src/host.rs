//! Traits for Rust-native objects embedded in a [`Value`].
//!
//! A host object opts into custom equality or cloning by returning itself
//! from [`HostObject::as_equatable`] or [`HostObject::as_deep_cloneable`].
//! The signatures are fixed by the traits, so there is no way to opt in with
//! the wrong shape of method.

use crate::error::Error;
use crate::value::Value;
use std::any::Any;
use std::fmt;

/// Custom equality: `self.equals(other)` decides the comparison outright.
pub trait Equatable {
    fn equals(&self, other: &Value) -> bool;
}

/// Custom deep copy: the returned value is used as the clone, with no
/// further traversal.
pub trait DeepCloneable {
    fn deep_clone(&self) -> Result<Value, Error>;
}

pub trait HostObject: fmt::Debug + Any {
    fn class_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn as_equatable(&self) -> Option<&dyn Equatable> {
        None
    }

    fn as_deep_cloneable(&self) -> Option<&dyn DeepCloneable> {
        None
    }
}
