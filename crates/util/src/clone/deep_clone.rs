use crate::capability;
use crate::error::Error;
use crate::options::CloneOptions;
use indexmap::IndexMap;
use replica_value::{ObjRef, Object, ObjectKind, Property, PropertyKey, RegExp, Value, ValueMap, ValueSet};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Creates an independent deep copy of a value.
///
/// - A value exposing a `deepClone` hook is replaced by the hook's result.
/// - Primitives and functions are returned as they are.
/// - Dates and regular expressions are rebuilt from their instant, or their
///   source and flags.
/// - Records, lists, maps and sets are copied field by field into a new
///   object with the same prototype.
///
/// An object reached twice in the same call is copied once, so cycles and
/// shared references keep their shape in the copy. Host objects without a
/// hook cannot be reflected over and are shared with the copy.
///
/// # Errors
///
/// A failing `deepClone` hook propagates unchanged as [`Error::Value`].
///
/// # Examples
///
/// ```
/// use replica_util::{deep_clone, deep_equal};
/// use replica_value::Value;
///
/// let original = Value::record([("a", Value::record([("b", Value::from(1))]))]);
/// let copy = deep_clone(&original).unwrap();
/// assert!(deep_equal(&original, &copy));
///
/// let inner = copy.as_object().unwrap().get("a").unwrap();
/// inner.as_object().unwrap().set("b", 2);
///
/// let untouched = original.as_object().unwrap().get("a").unwrap();
/// assert_eq!(untouched.as_object().unwrap().get("b").and_then(|v| v.as_f64()), Some(1.0));
/// ```
pub fn deep_clone(value: &Value) -> Result<Value, Error> {
    deep_clone_with(value, &CloneOptions::default())
}

/// [`deep_clone`] honoring `options`.
///
/// # Errors
///
/// Additionally [`Error::TooDeep`] when an object nested deeper than
/// `options.max_depth` would have to be copied.
pub fn deep_clone_with(value: &Value, options: &CloneOptions) -> Result<Value, Error> {
    Cloner::new(*options).run(value)
}

/// A copied object whose fields still have to be filled in.
struct Pending {
    source: ObjRef,
    target: ObjRef,
    depth: usize,
}

/// Field contents of a source object, detached from its borrow so that
/// hooks run while copying can touch the source freely.
enum Snapshot {
    Record(IndexMap<PropertyKey, Property>),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
}

struct Cloner {
    options: CloneOptions,
    /// Source object id to its copy, for this call only.
    visited: HashMap<usize, ObjRef>,
    pending: Vec<Pending>,
}

impl Cloner {
    fn new(options: CloneOptions) -> Self {
        Self {
            options,
            visited: HashMap::new(),
            pending: Vec::new(),
        }
    }

    fn run(mut self, value: &Value) -> Result<Value, Error> {
        let root = self.clone_value(value, 0)?;
        while let Some(job) = self.pending.pop() {
            self.populate(job)?;
        }
        Ok(root)
    }

    /// Returns the copy of `value`. Structured objects come back as empty
    /// shells and are queued for [`Cloner::populate`].
    fn clone_value(&mut self, value: &Value, depth: usize) -> Result<Value, Error> {
        if let Some(result) = capability::call_deep_clone(value) {
            return Ok(result?);
        }
        let Value::Object(source) = value else {
            return Ok(value.clone());
        };

        let object = source.borrow();
        let proto = object.proto.clone();
        let shell = match &object.kind {
            ObjectKind::Date(time) => {
                return Ok(Value::object(proto, ObjectKind::Date(*time)));
            }
            ObjectKind::RegExp(re) => {
                let re = RegExp::new(re.source(), re.flags())?;
                return Ok(Value::object(proto, ObjectKind::RegExp(re)));
            }
            ObjectKind::Host(host) => {
                trace!(class = host.class_name(), "host object without deepClone hook is shared");
                return Ok(value.clone());
            }
            _ if self.visited.contains_key(&source.id()) => {
                return Ok(self.visited[&source.id()].clone().into());
            }
            ObjectKind::Record(props) => ObjectKind::Record(IndexMap::with_capacity(props.len())),
            ObjectKind::List(items) => ObjectKind::List(Vec::with_capacity(items.len())),
            ObjectKind::Map(_) => ObjectKind::Map(ValueMap::new()),
            ObjectKind::Set(_) => ObjectKind::Set(ValueSet::new()),
        };
        drop(object);

        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                debug!(limit, depth, "deep clone exceeded depth limit");
                return Err(Error::TooDeep { limit });
            }
        }

        let target = ObjRef::new(Object::with_proto(shell, proto));
        self.visited.insert(source.id(), target.clone());
        self.pending.push(Pending {
            source: source.clone(),
            target: target.clone(),
            depth,
        });
        Ok(Value::Object(target))
    }

    fn populate(&mut self, job: Pending) -> Result<(), Error> {
        let Pending {
            source,
            target,
            depth,
        } = job;
        let child = depth + 1;

        let snapshot = match &source.borrow().kind {
            ObjectKind::Record(props) => Snapshot::Record(props.clone()),
            ObjectKind::List(items) => Snapshot::List(items.clone()),
            ObjectKind::Map(map) => Snapshot::Map(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            ObjectKind::Set(set) => Snapshot::Set(set.iter().cloned().collect()),
            _ => return Ok(()),
        };

        let filled = match snapshot {
            Snapshot::Record(props) => {
                let mut copy = IndexMap::with_capacity(props.len());
                for (key, prop) in props {
                    let value = self.clone_value(&prop.value, child)?;
                    copy.insert(key, Property { value, ..prop });
                }
                ObjectKind::Record(copy)
            }
            Snapshot::List(items) => {
                let mut copy = Vec::with_capacity(items.len());
                for item in &items {
                    copy.push(self.clone_value(item, child)?);
                }
                ObjectKind::List(copy)
            }
            Snapshot::Map(entries) => {
                let mut copy = ValueMap::new();
                for (key, value) in &entries {
                    let key = self.clone_value(key, child)?;
                    let value = self.clone_value(value, child)?;
                    copy.insert(key, value);
                }
                ObjectKind::Map(copy)
            }
            Snapshot::Set(members) => {
                let mut copy = ValueSet::new();
                for member in &members {
                    copy.add(self.clone_value(member, child)?);
                }
                ObjectKind::Set(copy)
            }
        };
        target.borrow_mut().kind = filled;
        Ok(())
    }
}
