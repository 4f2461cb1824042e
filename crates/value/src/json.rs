//! Conversions between [`Value`] and `serde_json::Value`.

use crate::error::Error;
use crate::key::PropertyKey;
use crate::object::ObjectKind;
use crate::value::Value;
use serde_json::{Map, Number};
use std::time::{SystemTime, UNIX_EPOCH};

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(arr) => Value::list(arr.iter().map(Value::from)),
            serde_json::Value::Object(obj) => {
                Value::record(obj.iter().map(|(k, v)| (k.as_str(), Value::from(v))))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

impl Value {
    /// Converts to JSON following `JSON.stringify` rules.
    ///
    /// `undefined`, functions and symbols are dropped from records and become
    /// `null` inside lists. Non-finite numbers become `null`. Dates become
    /// their milliseconds since the Unix epoch. Maps, sets, regular
    /// expressions and host objects become `{}`. Symbol-keyed properties are
    /// skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Circular`] if the value contains itself, and
    /// [`Error::NotSerializable`] for a top-level `undefined`, function or
    /// symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use replica_value::Value;
    /// use serde_json::json;
    ///
    /// let v = Value::from(json!({"a": [1, 2.5, null], "b": "x"}));
    /// assert_eq!(v.to_json().unwrap(), json!({"a": [1, 2.5, null], "b": "x"}));
    /// ```
    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        let mut path = Vec::new();
        match to_json_inner(self, &mut path)? {
            Some(json) => Ok(json),
            None => Err(Error::NotSerializable(self.type_of())),
        }
    }
}

fn to_json_inner(value: &Value, path: &mut Vec<usize>) -> Result<Option<serde_json::Value>, Error> {
    let json = match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Object(obj) => {
            if path.contains(&obj.id()) {
                return Err(Error::Circular);
            }
            path.push(obj.id());
            let object = obj.borrow();
            let json = match &object.kind {
                ObjectKind::Record(props) => {
                    let mut map = Map::new();
                    for (key, prop) in props {
                        let PropertyKey::String(name) = key else {
                            continue;
                        };
                        if let Some(v) = to_json_inner(&prop.value, path)? {
                            map.insert(name.clone(), v);
                        }
                    }
                    serde_json::Value::Object(map)
                }
                ObjectKind::List(items) => {
                    let mut arr = Vec::with_capacity(items.len());
                    for item in items {
                        arr.push(to_json_inner(item, path)?.unwrap_or(serde_json::Value::Null));
                    }
                    serde_json::Value::Array(arr)
                }
                ObjectKind::Date(time) => number_to_json(epoch_millis(*time)),
                ObjectKind::Map(_)
                | ObjectKind::Set(_)
                | ObjectKind::RegExp(_)
                | ObjectKind::Host(_) => serde_json::Value::Object(Map::new()),
            };
            path.pop();
            json
        }
    };
    Ok(Some(json))
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn epoch_millis(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as f64,
        Err(e) => -(e.duration().as_millis() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Symbol;
    use crate::function::Function;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_from_json_shapes() {
        let v = Value::from(json!({"a": [1, "two", null, true], "b": {}}));
        let obj = v.as_object().unwrap();
        assert_eq!(obj.type_name(), "Object");
        let a = obj.get("a").unwrap();
        assert_eq!(a.as_object().unwrap().type_name(), "Array");
        assert_eq!(a.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_from_json_preserves_key_order() {
        let v = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<String> = v
            .as_object()
            .unwrap()
            .own_keys()
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_to_json_skips_unserializable_fields() {
        let f = Function::new("f", 0, "() => 1", |_, _| Ok(Value::from(1)));
        let v = Value::record([
            ("keep", Value::from(1)),
            ("undef", Value::Undefined),
            ("func", Value::from(f.clone())),
        ]);
        v.as_object()
            .unwrap()
            .set(Symbol::new(Some("hidden")), Value::from(2));
        assert_eq!(v.to_json().unwrap(), json!({"keep": 1}));

        let list = Value::list([Value::Undefined, Value::from(f), Value::from(f64::INFINITY)]);
        assert_eq!(list.to_json().unwrap(), json!([null, null, null]));
    }

    #[test]
    fn test_to_json_builtins() {
        let date = Value::date(UNIX_EPOCH + Duration::from_millis(1_500));
        assert_eq!(date.to_json().unwrap(), json!(1500));
        let before = Value::date(UNIX_EPOCH - Duration::from_millis(20));
        assert_eq!(before.to_json().unwrap(), json!(-20));
        assert_eq!(Value::regexp("a", "").unwrap().to_json().unwrap(), json!({}));
        assert_eq!(Value::map([]).to_json().unwrap(), json!({}));
    }

    #[test]
    fn test_to_json_circular() {
        let v = Value::empty_record();
        v.as_object().unwrap().set("me", v.clone());
        assert_eq!(v.to_json().unwrap_err(), Error::Circular);
    }

    #[test]
    fn test_to_json_shared_is_not_circular() {
        let shared = Value::list([Value::from(1)]);
        let v = Value::record([("a", shared.clone()), ("b", shared)]);
        assert_eq!(v.to_json().unwrap(), json!({"a": [1], "b": [1]}));
    }

    #[test]
    fn test_to_json_top_level_unserializable() {
        assert_eq!(
            Value::Undefined.to_json().unwrap_err(),
            Error::NotSerializable("undefined")
        );
        assert_eq!(
            Value::Symbol(Symbol::new(None)).to_json().unwrap_err(),
            Error::NotSerializable("symbol")
        );
    }

    #[test]
    fn test_to_json_fractional_numbers() {
        assert_eq!(Value::from(2.5).to_json().unwrap(), json!(2.5));
        assert_eq!(Value::from(-3).to_json().unwrap(), json!(-3));
    }
}
