use crate::collections::{ValueMap, ValueSet};
use crate::error::Error;
use crate::function::Function;
use crate::host::HostObject;
use crate::key::{PropertyKey, Symbol};
use crate::object::{ObjRef, Object, ObjectKind, Property};
use crate::proto::Proto;
use crate::regexp::RegExp;
use indexmap::IndexMap;
use std::time::SystemTime;

/// Any runtime value.
///
/// `Clone` is shallow for reference values: the clone of a
/// [`Value::Object`] is another handle to the same object. Use the clone
/// engine in `replica-util` for an independent copy.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The "absent" sentinel.
    #[default]
    Undefined,
    /// The "no value" sentinel, distinct from [`Value::Undefined`].
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    Function(Function),
    Object(ObjRef),
}

impl Value {
    pub fn record<K: Into<PropertyKey>>(fields: impl IntoIterator<Item = (K, Value)>) -> Value {
        Self::object(None, Self::record_kind(fields))
    }

    pub fn empty_record() -> Value {
        Self::object(None, ObjectKind::Record(IndexMap::new()))
    }

    /// A record whose behavior comes from `proto`.
    pub fn instance<K: Into<PropertyKey>>(
        proto: Proto,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Value {
        Self::object(Some(proto), Self::record_kind(fields))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Self::object(None, ObjectKind::List(items.into_iter().collect()))
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut map = ValueMap::new();
        for (k, v) in entries {
            map.insert(k, v);
        }
        Self::object(None, ObjectKind::Map(map))
    }

    pub fn set(members: impl IntoIterator<Item = Value>) -> Value {
        let mut set = ValueSet::new();
        for member in members {
            set.add(member);
        }
        Self::object(None, ObjectKind::Set(set))
    }

    pub fn date(time: SystemTime) -> Value {
        Self::object(None, ObjectKind::Date(time))
    }

    pub fn regexp(source: &str, flags: &str) -> Result<Value, Error> {
        Ok(Self::object(None, ObjectKind::RegExp(RegExp::new(source, flags)?)))
    }

    pub fn host(object: impl HostObject) -> Value {
        Self::object(None, ObjectKind::Host(Box::new(object)))
    }

    pub fn object(proto: Option<Proto>, kind: ObjectKind) -> Value {
        Value::Object(ObjRef::new(Object::with_proto(kind, proto)))
    }

    fn record_kind<K: Into<PropertyKey>>(fields: impl IntoIterator<Item = (K, Value)>) -> ObjectKind {
        ObjectKind::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), Property::data(v)))
                .collect(),
        )
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Function(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Scripting-language truthiness: `false`, `0`, `-0`, `NaN`, `""`,
    /// `null` and `undefined` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Function(_) | Value::Object(_) => true,
        }
    }

    /// The `typeof` name of the value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<ObjRef> for Value {
    fn from(o: ObjRef) -> Self {
        Value::Object(o)
    }
}
