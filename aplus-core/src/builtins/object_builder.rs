use crate::types::Value;

use super::function::Function;
use super::object::JObject;

/// builds a [`JObject`] field by field.
///
/// ```
/// use aplus_core::{ObjectBuilder, Value};
///
/// let thenable = ObjectBuilder::new()
///     .method("then", |args| {
///         args[0].call(&[Value::from(42)])?;
///         Ok(Value::Undefined)
///     })
///     .build();
/// assert!(Value::Object(thenable).thenable().is_some());
/// ```
#[derive(Default)]
pub struct ObjectBuilder {
    fields: Vec<(String, Value)>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn method<K, F>(self, key: K, f: F) -> Self
    where
        K: Into<String>,
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        self.field(key, Function::new(f))
    }

    pub fn build(self) -> JObject {
        let obj = JObject::new();
        {
            let mut props = obj.inner.write();
            for (k, v) in self.fields {
                props.insert(k, v);
            }
        }
        obj
    }
}
