use replica_value::{MapKey, Value};

/// Representation identity.
///
/// Numbers are identical only when their bit patterns match and they are
/// not NaN, so `NaN` differs from itself and `+0` differs from `-0`.
/// Strings and booleans compare by content, the two empty sentinels by
/// kind, and symbols, functions and objects by identity.
///
/// # Examples
///
/// ```
/// use replica_util::same_value_strict;
/// use replica_value::Value;
///
/// assert!(same_value_strict(&Value::from(1.0), &Value::from(1)));
/// assert!(!same_value_strict(&Value::from(f64::NAN), &Value::from(f64::NAN)));
/// assert!(!same_value_strict(&Value::from(0.0), &Value::from(-0.0)));
/// ```
pub fn same_value_strict(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => !a.is_nan() && a.to_bits() == b.to_bits(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// SameValueZero: the key identity used by maps and sets. `NaN` matches
/// itself and `-0` matches `+0`.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    MapKey::of(a) == MapKey::of(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_value::Symbol;

    #[test]
    fn test_strict_numbers() {
        assert!(same_value_strict(&Value::from(1.5), &Value::from(1.5)));
        assert!(!same_value_strict(&Value::from(1.5), &Value::from(2.5)));
        assert!(!same_value_strict(&Value::from(f64::NAN), &Value::from(f64::NAN)));
        assert!(!same_value_strict(&Value::from(0.0), &Value::from(-0.0)));
        assert!(same_value_strict(&Value::from(-0.0), &Value::from(-0.0)));
    }

    #[test]
    fn test_strict_sentinels_are_distinct() {
        assert!(same_value_strict(&Value::Undefined, &Value::Undefined));
        assert!(same_value_strict(&Value::Null, &Value::Null));
        assert!(!same_value_strict(&Value::Undefined, &Value::Null));
    }

    #[test]
    fn test_strict_references() {
        let sym = Symbol::new(Some("s"));
        assert!(same_value_strict(&Value::from(sym.clone()), &Value::from(sym)));
        assert!(!same_value_strict(
            &Value::from(Symbol::new(Some("s"))),
            &Value::from(Symbol::new(Some("s")))
        ));

        let obj = Value::empty_record();
        assert!(same_value_strict(&obj, &obj.clone()));
        assert!(!same_value_strict(&obj, &Value::empty_record()));
    }

    #[test]
    fn test_same_value_zero() {
        assert!(same_value_zero(&Value::from(f64::NAN), &Value::from(f64::NAN)));
        assert!(same_value_zero(&Value::from(0.0), &Value::from(-0.0)));
        assert!(!same_value_zero(&Value::from(1), &Value::from("1")));
    }
}
