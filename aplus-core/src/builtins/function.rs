use std::fmt;
use std::sync::Arc;

use crate::types::Value;

/// signature of every callable value. `Err` carries the thrown value.
pub type NativeFunction = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// a shared, callable value.
#[derive(Clone)]
pub struct Function(Arc<NativeFunction>);

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// a function reading only its first argument, `undefined` when absent
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self::new(move |args| f(args.first().cloned().unwrap_or_default()))
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        (self.0)(args)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function {:p}]", Arc::as_ptr(&self.0) as *const ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_defaults_missing_argument() {
        let f = Function::unary(|v| Ok(Value::from(v.is_undefined())));
        assert_eq!(f.call(&[]).unwrap(), Value::from(true));
        assert_eq!(f.call(&[Value::from(1)]).unwrap(), Value::from(false));
    }

    #[test]
    fn identity() {
        let f = Function::new(|_| Ok(Value::Undefined));
        let g = f.clone();
        let h = Function::new(|_| Ok(Value::Undefined));
        assert!(f.ptr_eq(&g));
        assert!(!f.ptr_eq(&h));
    }
}
