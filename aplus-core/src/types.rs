use std::fmt;
use std::sync::Arc;

use crate::builtins::function::Function;
use crate::builtins::object::JObject;
use crate::builtins::promise::{Promise, PromiseState};
use crate::error::Error;

/// a dynamically typed value.
///
/// objects, functions and promises are shared handles and compare by identity,
/// everything else compares structurally.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Object(JObject),
    Function(Function),
    Promise(Promise),
}

/// result of the thenable capability check performed by [`Value::thenable`].
#[derive(Clone)]
pub enum Thenable {
    /// a promise of this crate, adopted through its own `then`
    Native(Promise),
    /// the callable `then` member of a foreign object
    Foreign(Function),
}

impl Default for Value {
    fn default() -> Self {
        Self::Undefined
    }
}

impl Value {
    pub const UNDEFINED: Self = Self::Undefined;
    pub const NULL: Self = Self::Null;

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `null` or `undefined`
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[inline]
    pub fn is_promise(&self) -> bool {
        matches!(self, Self::Promise(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_promise(&self) -> Option<&Promise> {
        match self {
            Self::Promise(p) => Some(p),
            _ => None,
        }
    }

    /// duck-typed thenable check.
    ///
    /// a native promise is always thenable. an object is thenable only when its
    /// `then` member currently holds a function; a non-callable `then` makes it
    /// a plain value.
    pub fn thenable(&self) -> Option<Thenable> {
        match self {
            Self::Promise(p) => Some(Thenable::Native(p.clone())),
            Self::Object(o) => match o.get_property("then") {
                Some(Value::Function(then)) => Some(Thenable::Foreign(then)),
                _ => None,
            },
            _ => None,
        }
    }

    /// calls the value as a function
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        match self {
            Self::Function(f) => f.call(args),
            v => Err(Error::NotCallable(v.to_string()).into()),
        }
    }

    /// strict equality: identity for shared handles, `===` semantics for scalars
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => true,
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Promise(a), Self::Promise(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Promise(_) => "promise",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => {
                if n.is_nan() {
                    f.write_str("NaN")
                } else if n.is_infinite() {
                    f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Self::String(s) => f.write_str(s),
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(_) => f.write_str("[Function]"),
            Self::Promise(p) => match p.state() {
                PromiseState::Pending => f.write_str("[Promise <pending>]"),
                PromiseState::Fulfilled(_) => f.write_str("[Promise <fulfilled>]"),
                PromiseState::Rejected(_) => f.write_str("[Promise <rejected>]"),
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Object(o) => {
                let mut map = f.debug_map();
                for key in o.keys() {
                    if let Some(v) = o.get_property(&key) {
                        map.entry(&key, &Shallow(&v));
                    }
                }
                map.finish()
            }
            Self::Promise(p) => write!(f, "{:?}", p),
            v => fmt::Display::fmt(v, f),
        }
    }
}

/// debug form of a nested value; shared handles print their display form so
/// self-referencing objects stay finite
struct Shallow<'a>(&'a Value);

impl fmt::Debug for Shallow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => write!(f, "{:?}", s),
            v => fmt::Display::fmt(v, f),
        }
    }
}
