use crate::function::Function;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A shared behavior set attached to objects: a named method table with an
/// optional parent.
///
/// Clones of an object keep pointing at the same `Proto`, which is how
/// methods survive a deep copy.
#[derive(Clone)]
pub struct Proto(Rc<ProtoInner>);

struct ProtoInner {
    name: String,
    methods: IndexMap<String, Function>,
    parent: Option<Proto>,
}

impl Proto {
    /// Methods are keyed by [`Function::name`]; a later method with the same
    /// name replaces an earlier one.
    pub fn new(name: impl Into<String>, methods: impl IntoIterator<Item = Function>) -> Self {
        Self::build(name.into(), methods, None)
    }

    pub fn with_parent(
        name: impl Into<String>,
        parent: Proto,
        methods: impl IntoIterator<Item = Function>,
    ) -> Self {
        Self::build(name.into(), methods, Some(parent))
    }

    fn build(name: String, methods: impl IntoIterator<Item = Function>, parent: Option<Proto>) -> Self {
        let methods = methods
            .into_iter()
            .map(|f| (f.name().to_string(), f))
            .collect();
        Proto(Rc::new(ProtoInner {
            name,
            methods,
            parent,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Proto> {
        self.0.parent.as_ref()
    }

    pub fn own_method(&self, name: &str) -> Option<&Function> {
        self.0.methods.get(name)
    }

    /// Finds a method on this prototype or the nearest ancestor defining it.
    pub fn lookup(&self, name: &str) -> Option<Function> {
        let mut current = Some(self);
        while let Some(proto) = current {
            if let Some(method) = proto.own_method(name) {
                return Some(method.clone());
            }
            current = proto.parent();
        }
        None
    }

    pub fn ptr_eq(&self, other: &Proto) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Proto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proto")
            .field("name", &self.0.name)
            .field("methods", &self.0.methods.keys().collect::<Vec<_>>())
            .field("parent", &self.0.parent.as_ref().map(Proto::name))
            .finish()
    }
}
