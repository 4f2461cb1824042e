use crate::capability;
use crate::error::Error;
use crate::options::{Comparison, EqualOptions};
use crate::same_value::same_value_strict;
use replica_value::{Function, ObjectKind, Property, Value};
use std::collections::HashSet;
use tracing::debug;

/// Performs a deep equality check between two values.
///
/// Rules are applied in order, each one deciding the result if it applies:
///
/// 1. `a` exposes an `equals` hook: its answer for `b`.
/// 2. `b` exposes an `equals` hook: its answer for `a`.
/// 3. Representation identity (see [`same_value_strict`]): equal.
/// 4. Either side is `undefined` or `null`: unequal.
/// 5. Either side is not an object: unequal.
/// 6. Own key counts differ: unequal.
/// 7. Every own key of `a` must exist in `b` with an equal value. Two
///    functions under the same key are equal when their source text is.
///    Accessor properties are read through their getters.
///
/// Key order is irrelevant for records; lists compare index by index. A
/// hook that fails counts as "not equal".
///
/// # Examples
///
/// ```
/// use replica_util::deep_equal;
/// use replica_value::Value;
///
/// let a = Value::record([("a", Value::from(1)), ("b", Value::from(2))]);
/// let b = Value::record([("b", Value::from(2)), ("a", Value::from(1))]);
/// assert!(deep_equal(&a, &b));
///
/// let short = Value::list([Value::from(1), Value::from(2)]);
/// let long = Value::list([Value::from(1), Value::from(2), Value::from(3)]);
/// assert!(!deep_equal(&short, &long));
///
/// assert!(!deep_equal(&Value::Undefined, &Value::Null));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    total(a, b, &EqualOptions::default())
}

/// Like [`deep_equal`], but compares full property descriptors
/// (`configurable`, `enumerable`, `writable`, the stored value, and the
/// getter and setter by source text). Getters are not invoked.
pub fn deep_equal_strict(a: &Value, b: &Value) -> bool {
    total(a, b, &EqualOptions::strict())
}

/// Deep equality honoring `options`, reporting failures instead of
/// folding them into `false`.
///
/// # Errors
///
/// [`Error::Value`] when an `equals` hook or a getter fails, [`Error::TooDeep`] when an
/// object deeper than `options.max_depth` has to be inspected.
pub fn try_deep_equal(a: &Value, b: &Value, options: &EqualOptions) -> Result<bool, Error> {
    Comparator::new(*options).run(a, b, 0)
}

fn total(a: &Value, b: &Value, options: &EqualOptions) -> bool {
    match try_deep_equal(a, b, options) {
        Ok(equal) => equal,
        Err(err) => {
            debug!(error = %err, "deep equality aborted, treating values as unequal");
            false
        }
    }
}

pub(super) type Pending = Vec<(Value, Value, usize)>;

pub(super) struct Comparator {
    options: EqualOptions,
    /// Object pairs already accepted for comparison. Meeting one again means
    /// a cycle (or a shared subtree) whose outcome is already being decided,
    /// so it is assumed equal.
    seen: HashSet<(usize, usize)>,
    /// Pairs in insertion order, so a trial comparison can retract the
    /// assumptions it made.
    trail: Vec<(usize, usize)>,
}

impl Comparator {
    fn new(options: EqualOptions) -> Self {
        Self {
            options,
            seen: HashSet::new(),
            trail: Vec::new(),
        }
    }

    fn run(&mut self, a: &Value, b: &Value, depth: usize) -> Result<bool, Error> {
        let mut pending: Pending = vec![(a.clone(), b.clone(), depth)];
        while let Some((a, b, depth)) = pending.pop() {
            if !self.step(&a, &b, depth, &mut pending)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Compares `a` and `b` in a separate traversal that starts from the
    /// current assumptions. Whatever it assumes along the way is retracted
    /// before returning.
    pub(super) fn sub_equal(&mut self, a: &Value, b: &Value, depth: usize) -> Result<bool, Error> {
        let mark = self.trail.len();
        let result = self.run(a, b, depth);
        for pair in self.trail.drain(mark..) {
            self.seen.remove(&pair);
        }
        result
    }

    /// [`Comparator::sub_equal`] for a value held under a key, where two
    /// functions compare by source text.
    pub(super) fn sub_slot_equal(&mut self, a: &Value, b: &Value, depth: usize) -> Result<bool, Error> {
        if let (Value::Function(f), Value::Function(g)) = (a, b) {
            return Ok(f.source() == g.source());
        }
        self.sub_equal(a, b, depth)
    }

    /// Decides one pair, queueing child pairs onto `pending`. Returns
    /// `false` as soon as the pair is known to differ.
    fn step(&mut self, a: &Value, b: &Value, depth: usize, pending: &mut Pending) -> Result<bool, Error> {
        if let Some(result) = capability::call_equals(a, b) {
            return Ok(result?);
        }
        if let Some(result) = capability::call_equals(b, a) {
            return Ok(result?);
        }
        if same_value_strict(a, b) {
            return Ok(true);
        }
        if a.is_nullish() || b.is_nullish() {
            return Ok(false);
        }
        let (Value::Object(obj_a), Value::Object(obj_b)) = (a, b) else {
            return Ok(false);
        };

        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                debug!(limit, depth, "deep equality exceeded depth limit");
                return Err(Error::TooDeep { limit });
            }
        }
        let pair = (obj_a.id(), obj_b.id());
        if !self.seen.insert(pair) {
            return Ok(true);
        }
        self.trail.push(pair);

        let object_a = obj_a.borrow();
        let object_b = obj_b.borrow();
        let child = depth + 1;
        // Record fields are detached from the borrow so that getters run
        // while reading them can touch their object.
        let fields = match (&object_a.kind, &object_b.kind) {
            (ObjectKind::Record(props_a), ObjectKind::Record(props_b)) => {
                if props_a.len() != props_b.len() {
                    return Ok(false);
                }
                let mut fields = Vec::with_capacity(props_a.len());
                for (key, prop_a) in props_a {
                    let Some(prop_b) = props_b.get(key) else {
                        return Ok(false);
                    };
                    fields.push((prop_a.clone(), prop_b.clone()));
                }
                fields
            }
            (ObjectKind::List(items_a), ObjectKind::List(items_b)) => {
                if items_a.len() != items_b.len() {
                    return Ok(false);
                }
                for (x, y) in items_a.iter().zip(items_b) {
                    if !compare_slot(x, y, child, pending) {
                        return Ok(false);
                    }
                }
                return Ok(true);
            }
            (ObjectKind::Map(map_a), ObjectKind::Map(map_b)) => {
                return self.compare_maps(map_a, map_b, child, pending);
            }
            (ObjectKind::Set(set_a), ObjectKind::Set(set_b)) => {
                return self.compare_sets(set_a, set_b, child);
            }
            (ObjectKind::Date(x), ObjectKind::Date(y)) => return Ok(x == y),
            (ObjectKind::RegExp(x), ObjectKind::RegExp(y)) => {
                return Ok(x.source() == y.source() && x.flags() == y.flags());
            }
            _ => return Ok(false),
        };
        drop(object_a);
        drop(object_b);

        for (prop_a, prop_b) in &fields {
            if !self.compare_property((a, prop_a), (b, prop_b), child, pending)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Compares one record field, each side given with its owning object.
    fn compare_property(
        &self,
        (owner_a, a): (&Value, &Property),
        (owner_b, b): (&Value, &Property),
        depth: usize,
        pending: &mut Pending,
    ) -> Result<bool, Error> {
        if self.options.comparison == Comparison::Descriptor {
            if a.configurable != b.configurable || a.enumerable != b.enumerable || a.writable != b.writable {
                return Ok(false);
            }
            if !same_source(&a.getter, &b.getter) || !same_source(&a.setter, &b.setter) {
                return Ok(false);
            }
            return Ok(compare_slot(&a.value, &b.value, depth, pending));
        }
        let value_a = a.read(owner_a)?;
        let value_b = b.read(owner_b)?;
        Ok(compare_slot(&value_a, &value_b, depth, pending))
    }
}

fn same_source(a: &Option<Function>, b: &Option<Function>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(f), Some(g)) => f.source() == g.source(),
        _ => false,
    }
}

/// Two functions held under the same key are equal when their source text
/// is; any other pair is queued for a full comparison.
pub(super) fn compare_slot(a: &Value, b: &Value, depth: usize, pending: &mut Pending) -> bool {
    if let (Value::Function(f), Value::Function(g)) = (a, b) {
        return f.source() == g.source();
    }
    pending.push((a.clone(), b.clone(), depth));
    true
}
