//! Capability probing: does a value opt into custom equality or cloning?
//!
//! A script object opts in by exposing a function under a well-known name
//! with exactly the expected arity, either as an own property or through its
//! prototype chain. A function with the right name but any other arity is
//! not an opt-in. Rust-native host objects opt in through the
//! [`Equatable`](replica_value::Equatable) and
//! [`DeepCloneable`](replica_value::DeepCloneable) traits instead.

use replica_value::{Error, Function, HostObject, ObjectKind, PropertyKey, Value};
use tracing::trace;

/// Name of the custom equality hook; takes the other value.
pub const EQUALS: &str = "equals";
pub const EQUALS_ARITY: usize = 1;

/// Name of the custom clone hook; takes no arguments.
pub const DEEP_CLONE: &str = "deepClone";
pub const DEEP_CLONE_ARITY: usize = 0;

/// Finds the function `name` on `value` if it takes exactly `arity`
/// parameters.
///
/// An own property shadows the prototype chain, even when the own property
/// is not a function.
pub fn find_method(value: &Value, name: &str, arity: usize) -> Option<Function> {
    let obj = value.as_object()?;
    let object = obj.borrow();
    let method = match object.property(&PropertyKey::from(name)) {
        Some(prop) => prop.value.as_function().cloned(),
        None => object.proto.as_ref().and_then(|proto| proto.lookup(name)),
    };
    method.filter(|f| f.arity() == arity)
}

/// # Examples
///
/// ```
/// use replica_util::capability::has_method;
/// use replica_value::{Function, Value};
///
/// let equals = Function::new("equals", 1, "equals(other) { return true }", |_, _| {
///     Ok(Value::from(true))
/// });
/// let obj = Value::record([("equals", Value::from(equals))]);
///
/// assert!(has_method(&obj, "equals", 1));
/// assert!(!has_method(&obj, "equals", 2));
/// ```
pub fn has_method(value: &Value, name: &str, arity: usize) -> bool {
    find_method(value, name, arity).is_some()
}

pub fn implements_equals(value: &Value) -> bool {
    with_host(value, |host| host.as_equatable().is_some()).unwrap_or(false)
        || has_method(value, EQUALS, EQUALS_ARITY)
}

pub fn implements_deep_clone(value: &Value) -> bool {
    with_host(value, |host| host.as_deep_cloneable().is_some()).unwrap_or(false)
        || has_method(value, DEEP_CLONE, DEEP_CLONE_ARITY)
}

/// Runs `value.equals(other)` if `value` opts in; `None` otherwise.
///
/// Script hooks are called with `this = value` and their result reduced to
/// its truthiness.
pub(crate) fn call_equals(value: &Value, other: &Value) -> Option<Result<bool, Error>> {
    let host_result = with_host(value, |host| {
        host.as_equatable().map(|eq| {
            trace!(class = host.class_name(), "host equals hook");
            eq.equals(other)
        })
    })
    .flatten();
    if let Some(equal) = host_result {
        return Some(Ok(equal));
    }

    let method = find_method(value, EQUALS, EQUALS_ARITY)?;
    trace!(method = method.name(), "script equals hook");
    Some(
        method
            .call(value, std::slice::from_ref(other))
            .map(|res| res.is_truthy()),
    )
}

/// Runs `value.deepClone()` if `value` opts in; `None` otherwise.
pub(crate) fn call_deep_clone(value: &Value) -> Option<Result<Value, Error>> {
    let host_result = with_host(value, |host| {
        host.as_deep_cloneable().map(|c| {
            trace!(class = host.class_name(), "host deepClone hook");
            c.deep_clone()
        })
    })
    .flatten();
    if host_result.is_some() {
        return host_result;
    }

    let method = find_method(value, DEEP_CLONE, DEEP_CLONE_ARITY)?;
    trace!(method = method.name(), "script deepClone hook");
    Some(method.call(value, &[]))
}

fn with_host<R>(value: &Value, f: impl FnOnce(&dyn HostObject) -> R) -> Option<R> {
    let obj = value.as_object()?;
    let object = obj.borrow();
    match &object.kind {
        ObjectKind::Host(host) => Some(f(host.as_ref())),
        _ => None,
    }
}
