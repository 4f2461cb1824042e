use replica_value::Value;

/// Check if a value has no own entries: no record properties, list
/// elements, map entries or set members.
///
/// Non-objects are considered "empty" in terms of properties.
///
/// # Examples
///
/// ```
/// use replica_util::is_empty;
/// use replica_value::Value;
///
/// assert!(is_empty(&Value::empty_record()));
/// assert!(!is_empty(&Value::record([("foo", Value::from("bar"))])));
/// assert!(is_empty(&Value::from(42)));
/// ```
pub fn is_empty(value: &Value) -> bool {
    match value.as_object() {
        Some(obj) => obj.is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_is_empty_containers() {
        assert!(is_empty(&Value::empty_record()));
        assert!(is_empty(&Value::map([])));
        assert!(is_empty(&Value::set([])));
        assert!(!is_empty(&Value::list([Value::Undefined])));
        assert!(!is_empty(&Value::set([Value::Null])));
    }

    #[test]
    fn test_is_empty_builtins_and_primitives() {
        assert!(is_empty(&Value::date(UNIX_EPOCH)));
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&Value::from("")));
    }
}
