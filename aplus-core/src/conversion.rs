use std::sync::Arc;

use crate::types::Value;
use crate::{Function, JObject, Promise};

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! value_number {
    ($($n:ty),*) => {
        $(
            impl From<$n> for Value {
                fn from(v: $n) -> Self {
                    Value::Number(v as f64)
                }
            }
        )*
    };
}

value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(Arc::from(v))
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::String(v)
    }
}

impl From<JObject> for Value {
    fn from(v: JObject) -> Self {
        Value::Object(v)
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Value::Function(v)
    }
}

impl From<Promise> for Value {
    fn from(v: Promise) -> Self {
        Value::Promise(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Undefined,
        }
    }
}

impl From<&Value> for Option<f64> {
    fn from(v: &Value) -> Self {
        v.as_number()
    }
}

impl From<&Value> for Option<String> {
    fn from(v: &Value) -> Self {
        v.as_str().map(str::to_string)
    }
}

impl From<&Value> for Option<bool> {
    fn from(v: &Value) -> Self {
        v.as_bool()
    }
}
