//! Runtime values and type coercion.

use std::fmt;

use crate::{ObjectPath, VariableError, VariableResult};

/// A dynamically typed expression result.
///
/// Integers and floats are kept apart so that pixel coordinates read from the
/// mascot (`mascot.anchor.x`) round-trip through arithmetic without ever
/// passing through a float.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An opaque handle into host state, e.g. `mascot.environment`.
    Object(ObjectPath),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null      => "null",
            Value::Bool(_)   => "boolean",
            Value::Int(_)    => "integer",
            Value::Float(_)  => "number",
            Value::Str(_)    => "string",
            Value::Object(_) => "object",
        }
    }

    /// Numeric view; `None` for non-numbers.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(i)   => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Loose truthiness used by `!`, `&&`, `||`, and `?:`.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null      => false,
            Value::Bool(b)   => *b,
            Value::Int(i)    => *i != 0,
            Value::Float(f)  => *f != 0.0 && !f.is_nan(),
            Value::Str(s)    => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Coerce into `T`, reporting a `TypeMismatch` on failure.
    pub fn coerce<T: FromValue>(self) -> VariableResult<T> {
        let found = self.type_name();
        T::from_value(self).ok_or(VariableError::TypeMismatch {
            expected: T::EXPECTED,
            found,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null      => f.write_str("null"),
            Value::Bool(b)   => write!(f, "{b}"),
            Value::Int(i)    => write!(f, "{i}"),
            // Integral floats print without a fraction so `${x / 2}` reads
            // "5" rather than "5.0" inside templates.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{}", *x as i64)
            }
            Value::Float(x)  => write!(f, "{x}"),
            Value::Str(s)    => f.write_str(s),
            Value::Object(p) => write!(f, "{p}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// ── FromValue ─────────────────────────────────────────────────────────────────

/// Conversion out of a [`Value`] for typed reads (`eval_as::<i32>`, …).
pub trait FromValue: Sized {
    /// Type name used in `TypeMismatch` errors.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any";

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    /// Floats truncate toward zero.
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i)                  => Some(i),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl FromValue for u32 {
    const EXPECTED: &'static str = "non-negative integer";

    fn from_value(value: Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            Value::Str(s) if s.eq_ignore_ascii_case("true")  => Some(true),
            Value::Str(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    /// Every value has a string form.
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            other         => Some(other.to_string()),
        }
    }
}
