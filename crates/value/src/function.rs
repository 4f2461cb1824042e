use crate::error::Error;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Native body of a [`Function`]: receives `this` and the call arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, Error>;

/// A callable unit.
///
/// Besides its body, a function carries the metadata the engines inspect:
/// a declared `arity` (number of formal parameters) and its `source` text.
/// Identity is the allocation; `Clone` shares it.
///
/// # Examples
///
/// ```
/// use replica_value::{Function, Value};
///
/// let twice = Function::new("twice", 1, "x => x * 2", |_this, args| {
///     let n = args.first().and_then(Value::as_f64).unwrap_or(f64::NAN);
///     Ok(Value::from(n * 2.0))
/// });
///
/// assert_eq!(twice.arity(), 1);
/// let out = twice.call(&Value::Undefined, &[Value::from(21)]).unwrap();
/// assert_eq!(out.as_f64(), Some(42.0));
/// ```
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

struct FunctionInner {
    name: String,
    arity: usize,
    source: String,
    body: Box<NativeFn>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, arity: usize, source: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Error> + 'static,
    {
        Function(Rc::new(FunctionInner {
            name: name.into(),
            arity,
            source: source.into(),
            body: Box::new(body),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, Error> {
        (self.0.body)(this, args)
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}/{})", self.name(), self.arity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_metadata() {
        let f = Function::new("add", 2, "(a, b) => a + b", |_, _| Ok(Value::Undefined));
        assert_eq!(f.name(), "add");
        assert_eq!(f.arity(), 2);
        assert_eq!(f.source(), "(a, b) => a + b");
        assert_eq!(format!("{:?}", f), "Function(add/2)");
    }

    #[test]
    fn test_function_receives_this() {
        let f = Function::new("self", 0, "function () { return this }", |this, _| {
            Ok(this.clone())
        });
        let out = f.call(&Value::from("me"), &[]).unwrap();
        assert_eq!(out.as_str(), Some("me"));
    }

    #[test]
    fn test_function_failure_propagates() {
        let f = Function::new("boom", 0, "() => { throw 'boom' }", |_, _| {
            Err(Error::thrown("boom"))
        });
        assert_eq!(
            f.call(&Value::Undefined, &[]).unwrap_err(),
            Error::Thrown("boom".into())
        );
    }

    #[test]
    fn test_function_identity() {
        let f = Function::new("f", 0, "() => 1", |_, _| Ok(Value::from(1)));
        let g = Function::new("f", 0, "() => 1", |_, _| Ok(Value::from(1)));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
