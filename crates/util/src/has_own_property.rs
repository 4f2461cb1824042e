use replica_value::{ObjectKind, PropertyKey, Value};

/// Check if a value has an own property with the given key.
///
/// Records answer for their own (not inherited) string and symbol keys.
/// Lists answer for their indices and `length`. Every other value has no
/// own properties.
///
/// # Examples
///
/// ```
/// use replica_util::has_own_property;
/// use replica_value::Value;
///
/// let obj = Value::record([("foo", Value::from(1))]);
/// assert!(has_own_property(&obj, "foo"));
/// assert!(!has_own_property(&obj, "bar"));
///
/// let list = Value::list([Value::from("a")]);
/// assert!(has_own_property(&list, "0"));
/// assert!(has_own_property(&list, "length"));
/// assert!(!has_own_property(&list, "1"));
/// ```
pub fn has_own_property(value: &Value, key: impl Into<PropertyKey>) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let key = key.into();
    let object = obj.borrow();
    match &object.kind {
        ObjectKind::Record(props) => props.contains_key(&key),
        ObjectKind::List(items) => {
            key.as_str() == Some("length") || key.as_index().is_some_and(|i| i < items.len())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_value::{Function, Proto, Symbol};

    #[test]
    fn test_has_own_property_record() {
        let obj = Value::record([("foo", Value::from(1)), ("bar", Value::Undefined)]);
        assert!(has_own_property(&obj, "foo"));
        assert!(has_own_property(&obj, "bar"));
        assert!(!has_own_property(&obj, "baz"));
    }

    #[test]
    fn test_has_own_property_symbol() {
        let sym = Symbol::new(Some("s"));
        let obj = Value::record([(PropertyKey::from(&sym), Value::from(1))]);
        assert!(has_own_property(&obj, &sym));
        assert!(!has_own_property(&obj, Symbol::new(Some("s"))));
    }

    #[test]
    fn test_inherited_methods_are_not_own() {
        let method = Function::new("greet", 0, "greet() {}", |_, _| Ok(Value::Undefined));
        let obj = Value::instance(Proto::new("P", [method]), [("x", Value::from(1))]);
        assert!(has_own_property(&obj, "x"));
        assert!(!has_own_property(&obj, "greet"));
    }

    #[test]
    fn test_has_own_property_non_objects() {
        assert!(!has_own_property(&Value::Null, "foo"));
        assert!(!has_own_property(&Value::from("foo"), "length"));
        assert!(!has_own_property(&Value::map([(Value::from("k"), Value::from(1))]), "k"));
    }
}
