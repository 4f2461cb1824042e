use crate::value::Value;
use indexmap::IndexMap;

/// Hashable identity of a [`Value`] under SameValueZero.
///
/// Primitives are keyed by content, with every NaN collapsed to one key and
/// `-0` folded into `+0`. Symbols, functions and objects are keyed by
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Undefined,
    Null,
    Bool(bool),
    Number(u64),
    String(String),
    Symbol(usize),
    Function(usize),
    Object(usize),
}

impl MapKey {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Undefined => MapKey::Undefined,
            Value::Null => MapKey::Null,
            Value::Bool(b) => MapKey::Bool(*b),
            Value::Number(n) => {
                let n = if n.is_nan() {
                    f64::NAN
                } else if *n == 0.0 {
                    0.0
                } else {
                    *n
                };
                MapKey::Number(n.to_bits())
            }
            Value::String(s) => MapKey::String(s.clone()),
            Value::Symbol(sym) => MapKey::Symbol(sym.id()),
            Value::Function(f) => MapKey::Function(f.id()),
            Value::Object(obj) => MapKey::Object(obj.id()),
        }
    }

    /// Whether the key stands for a reference (symbol, function or object)
    /// rather than a primitive.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            MapKey::Symbol(_) | MapKey::Function(_) | MapKey::Object(_)
        )
    }
}

/// Insertion-ordered mapping from arbitrary values to values.
///
/// The original key value is stored next to each entry, which also keeps
/// referenced objects alive for as long as their identity is used as a key.
///
/// # Examples
///
/// ```
/// use replica_value::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert(Value::from(0.0), Value::from("zero"));
///
/// // SameValueZero: -0 finds the +0 entry.
/// assert_eq!(map.get(&Value::from(-0.0)).and_then(Value::as_str), Some("zero"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: IndexMap<MapKey, (Value, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.get_by_key(&MapKey::of(key))
    }

    pub fn get_by_key(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(&MapKey::of(key))
    }

    /// Inserts or replaces the value for `key`. A replaced entry keeps its
    /// original position and key. Returns the previous value, if any.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.entries.entry(MapKey::of(&key)) {
            indexmap::map::Entry::Occupied(mut slot) => {
                Some(std::mem::replace(&mut slot.get_mut().1, value))
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries.shift_remove(&MapKey::of(key)).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.values().map(|(k, v)| (k, v))
    }

    /// Iterates entries together with their precomputed [`MapKey`].
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&MapKey, &Value, &Value)> {
        self.entries.iter().map(|(mk, (k, v))| (mk, k, v))
    }
}

/// Insertion-ordered set of arbitrary values under SameValueZero.
#[derive(Debug, Clone, Default)]
pub struct ValueSet {
    members: IndexMap<MapKey, Value>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Adds a member; returns `false` if an equivalent member was present.
    pub fn add(&mut self, value: Value) -> bool {
        let key = MapKey::of(&value);
        if self.members.contains_key(&key) {
            return false;
        }
        self.members.insert(key, value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains_key(&MapKey::of(value))
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.members.contains_key(key)
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        self.members.shift_remove(&MapKey::of(value)).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.members.values()
    }

    pub fn iter_keyed(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key_same_value_zero() {
        assert_eq!(MapKey::of(&Value::from(f64::NAN)), MapKey::of(&Value::from(-f64::NAN)));
        assert_eq!(MapKey::of(&Value::from(0.0)), MapKey::of(&Value::from(-0.0)));
        assert_ne!(MapKey::of(&Value::from(1.0)), MapKey::of(&Value::from("1")));
        assert_ne!(MapKey::of(&Value::Null), MapKey::of(&Value::Undefined));
    }

    #[test]
    fn test_map_key_objects_by_identity() {
        let a = Value::list([]);
        let b = Value::list([]);
        assert_eq!(MapKey::of(&a), MapKey::of(&a.clone()));
        assert_ne!(MapKey::of(&a), MapKey::of(&b));
        assert!(MapKey::of(&a).is_reference());
        assert!(!MapKey::of(&Value::from("a")).is_reference());
    }

    #[test]
    fn test_value_map_insert_keeps_position() {
        let mut map = ValueMap::new();
        assert!(map.insert(Value::from("a"), Value::from(1)).is_none());
        assert!(map.insert(Value::from("b"), Value::from(2)).is_none());
        let prev = map.insert(Value::from("a"), Value::from(3));
        assert_eq!(prev.and_then(|v| v.as_f64()), Some(1.0));

        let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str().unwrap().to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get(&Value::from("a")).and_then(Value::as_f64), Some(3.0));
    }

    #[test]
    fn test_value_map_remove_preserves_order() {
        let mut map = ValueMap::new();
        for k in ["x", "y", "z"] {
            map.insert(Value::from(k), Value::Null);
        }
        assert!(map.remove(&Value::from("y")).is_some());
        assert!(map.remove(&Value::from("y")).is_none());
        let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str().unwrap().to_string()).collect();
        assert_eq!(keys, vec!["x", "z"]);
    }

    #[test]
    fn test_value_set() {
        let mut set = ValueSet::new();
        assert!(set.add(Value::from(f64::NAN)));
        assert!(!set.add(Value::from(f64::NAN)));
        assert!(set.add(Value::from(1)));
        assert!(set.contains(&Value::from(1.0)));
        assert_eq!(set.len(), 2);
        assert!(set.remove(&Value::from(1)));
        assert_eq!(set.len(), 1);
    }
}
