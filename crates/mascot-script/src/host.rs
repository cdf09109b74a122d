//! The bridge between expressions and live host state.

use std::fmt;

use crate::{Value, VariableResult};

/// Path of member names from a root handle, e.g. `mascot.environment.workArea`.
///
/// Object values are never materialised: the host resolves a path each time
/// a member of it is read, so expressions always see the current frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectPath(Vec<String>);

impl ObjectPath {
    pub fn root(name: impl Into<String>) -> Self {
        ObjectPath(vec![name.into()])
    }

    /// The path one member deeper.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        ObjectPath(segments)
    }

    /// Borrowed segments, convenient for slice patterns in `Host` impls.
    pub fn segments(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Implemented by whatever owns the objects that `Value::Object` paths point
/// into.
pub trait Host {
    /// Read `object.name`.  Returning another `Value::Object` lets the host
    /// expose nested objects.
    fn member(&self, object: &ObjectPath, name: &str) -> VariableResult<Value>;

    /// Invoke `object.method(args…)`.
    fn call(&mut self, object: &ObjectPath, method: &str, args: &[Value]) -> VariableResult<Value>;

    /// Uniform `f64` in `[0, 1)` for `Math.random()`.
    fn random(&mut self) -> f64;
}
