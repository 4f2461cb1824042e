use crate::collections::{ValueMap, ValueSet};
use crate::error::Error;
use crate::function::Function;
use crate::host::HostObject;
use crate::key::PropertyKey;
use crate::proto::Proto;
use crate::regexp::RegExp;
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

/// A record field together with its descriptor flags.
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub getter: Option<Function>,
    pub setter: Option<Function>,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    /// A plain data property: writable, enumerable and configurable.
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            getter: None,
            setter: None,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(value: impl Into<Value>) -> Self {
        Self {
            writable: false,
            ..Self::data(value)
        }
    }

    pub fn accessor(getter: Option<Function>, setter: Option<Function>) -> Self {
        Self {
            value: Value::Undefined,
            getter,
            setter,
            writable: false,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }

    /// The value seen when reading this property from `this`: the stored
    /// value for data properties, the getter's result for accessors, and
    /// `undefined` for an accessor without a getter.
    pub fn read(&self, this: &Value) -> Result<Value, Error> {
        match &self.getter {
            Some(getter) => getter.call(this, &[]),
            None if self.is_accessor() => Ok(Value::Undefined),
            None => Ok(self.value.clone()),
        }
    }
}

/// The closed set of object shapes.
#[derive(Debug)]
pub enum ObjectKind {
    Record(IndexMap<PropertyKey, Property>),
    List(Vec<Value>),
    Map(ValueMap),
    Set(ValueSet),
    Date(SystemTime),
    RegExp(RegExp),
    Host(Box<dyn HostObject>),
}

impl ObjectKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Record(_) => "Object",
            ObjectKind::List(_) => "Array",
            ObjectKind::Map(_) => "Map",
            ObjectKind::Set(_) => "Set",
            ObjectKind::Date(_) => "Date",
            ObjectKind::RegExp(_) => "RegExp",
            ObjectKind::Host(_) => "Host",
        }
    }
}

#[derive(Debug)]
pub struct Object {
    pub proto: Option<Proto>,
    pub kind: ObjectKind,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Self { proto: None, kind }
    }

    pub fn with_proto(kind: ObjectKind, proto: Option<Proto>) -> Self {
        Self { proto, kind }
    }

    /// Own property keys in insertion order.
    ///
    /// Lists expose their indices followed by `length`; maps, sets and the
    /// built-ins expose no own keys.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        match &self.kind {
            ObjectKind::Record(props) => props.keys().cloned().collect(),
            ObjectKind::List(items) => (0..items.len())
                .map(PropertyKey::from)
                .chain(std::iter::once(PropertyKey::from("length")))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Reads an own property's stored value. Accessor properties are not
    /// invoked.
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        match &self.kind {
            ObjectKind::Record(props) => props.get(key).map(|p| p.value.clone()),
            ObjectKind::List(items) => {
                if key.as_str() == Some("length") {
                    return Some(Value::from(items.len() as f64));
                }
                key.as_index().and_then(|i| items.get(i).cloned())
            }
            _ => None,
        }
    }

    pub fn property(&self, key: &PropertyKey) -> Option<&Property> {
        match &self.kind {
            ObjectKind::Record(props) => props.get(key),
            _ => None,
        }
    }

    /// Number of own entries: properties, elements, map entries or set members.
    pub fn len(&self) -> usize {
        match &self.kind {
            ObjectKind::Record(props) => props.len(),
            ObjectKind::List(items) => items.len(),
            ObjectKind::Map(map) => map.len(),
            ObjectKind::Set(set) => set.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared, interior-mutable handle to an [`Object`].
///
/// Identity is the allocation: two handles are the same object only if
/// [`ObjRef::ptr_eq`] holds. `Clone` copies the handle, not the object.
#[derive(Clone)]
pub struct ObjRef(Rc<RefCell<Object>>);

impl ObjRef {
    pub fn new(object: Object) -> Self {
        ObjRef(Rc::new(RefCell::new(object)))
    }

    /// Address of the underlying allocation, stable for the object's lifetime.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &ObjRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    pub fn proto(&self) -> Option<Proto> {
        self.borrow().proto.clone()
    }

    pub fn type_name(&self) -> &'static str {
        self.borrow().kind.type_name()
    }

    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.borrow().own_keys()
    }

    pub fn get(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        self.borrow().get(&key.into())
    }

    /// Reads an own property the way a script would, invoking the getter of
    /// an accessor property with this object as `this`.
    ///
    /// # Errors
    ///
    /// Whatever the getter fails with.
    pub fn read(&self, key: impl Into<PropertyKey>) -> Result<Option<Value>, Error> {
        let key = key.into();
        let property = self.borrow().property(&key).cloned();
        match property {
            Some(property) => property.read(&Value::Object(self.clone())).map(Some),
            None => Ok(self.get(key)),
        }
    }

    pub fn len(&self) -> usize {
        self.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.borrow().is_empty()
    }

    /// Assigns a property or list element.
    ///
    /// Returns `false` when the assignment is not possible: a read-only or
    /// accessor property, a non-index key on a list, or an object shape
    /// without named fields. Writing past the end of a list pads it with
    /// `undefined`.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        let mut object = self.borrow_mut();
        match &mut object.kind {
            ObjectKind::Record(props) => match props.get_mut(&key) {
                Some(prop) if !prop.writable || prop.is_accessor() => false,
                Some(prop) => {
                    prop.value = value;
                    true
                }
                None => {
                    props.insert(key, Property::data(value));
                    true
                }
            },
            ObjectKind::List(items) => match key.as_index() {
                Some(i) => {
                    if i >= items.len() {
                        items.resize(i + 1, Value::Undefined);
                    }
                    items[i] = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Defines (or redefines) a record property with a full descriptor.
    pub fn define(&self, key: impl Into<PropertyKey>, property: Property) -> bool {
        match &mut self.borrow_mut().kind {
            ObjectKind::Record(props) => {
                props.insert(key.into(), property);
                true
            }
            _ => false,
        }
    }

    pub fn push(&self, value: impl Into<Value>) -> bool {
        match &mut self.borrow_mut().kind {
            ObjectKind::List(items) => {
                items.push(value.into());
                true
            }
            _ => false,
        }
    }

    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> bool {
        match &mut self.borrow_mut().kind {
            ObjectKind::Map(map) => {
                map.insert(key.into(), value.into());
                true
            }
            _ => false,
        }
    }

    pub fn add(&self, value: impl Into<Value>) -> bool {
        match &mut self.borrow_mut().kind {
            ObjectKind::Set(set) => set.add(value.into()),
            _ => false,
        }
    }
}

impl fmt::Debug for ObjRef {
    // Cycles make a structural dump unbounded, so only the shape and
    // identity are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => write!(f, "{}#{:x}", object.kind.type_name(), self.id()),
            Err(_) => write!(f, "<borrowed>#{:x}", self.id()),
        }
    }
}
