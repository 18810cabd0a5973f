use std::sync::Arc;

use aplus_core::{Function, JObject, ObjectBuilder, Promise, Value};

/// a Rust type that behaves like a thenable.
///
/// wrap it with [`thenable_value`] to get a value any promise will adopt.
pub trait CustomThenable: Send + Sync + 'static {
    /// must eventually call at most one of the two callbacks. returning `Err`
    /// counts as throwing from `then`.
    fn then(&self, on_fulfilled: Function, on_rejected: Function) -> Result<(), Value>;
}

/// an object whose `then` member forwards to `thenable`
pub fn thenable_value<T: CustomThenable>(thenable: T) -> Value {
    let thenable = Arc::new(thenable);
    let obj = ObjectBuilder::new()
        .method("then", move |args| {
            let on_fulfilled = callback(args, 0);
            let on_rejected = callback(args, 1);
            thenable.then(on_fulfilled, on_rejected)?;
            Ok(Value::Undefined)
        })
        .build();
    Value::Object(obj)
}

fn callback(args: &[Value], index: usize) -> Function {
    args.get(index)
        .and_then(Value::as_function)
        .cloned()
        .unwrap_or_else(|| Function::new(|_| Ok(Value::Undefined)))
}

/// conversion of handler return values into the `Ok`/throw outcome the
/// promise machinery expects
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Value, Value>;
}

macro_rules! outcome_from_value {
    ($($t:ty),*) => {
        $(
            impl IntoOutcome for $t {
                fn into_outcome(self) -> Result<Value, Value> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

outcome_from_value!(
    Value, (), bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String,
    JObject, Function, Promise
);

impl<T, E> IntoOutcome for Result<T, E>
where
    T: Into<Value>,
    E: Into<Value>,
{
    fn into_outcome(self) -> Result<Value, Value> {
        self.map(Into::into).map_err(Into::into)
    }
}

/// a handler built from a one-argument closure
pub fn handler<F, R>(f: F) -> Function
where
    F: Fn(Value) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Function::unary(move |v| f(v).into_outcome())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ready(i32);

    impl CustomThenable for Ready {
        fn then(&self, on_fulfilled: Function, _on_rejected: Function) -> Result<(), Value> {
            on_fulfilled.call(&[Value::from(self.0)])?;
            Ok(())
        }
    }

    #[test]
    fn custom_thenable_is_duck_typed() {
        let v = thenable_value(Ready(3));
        assert!(v.thenable().is_some());
        assert_eq!(Promise::resolved(v).value(), Some(Value::from(3)));
    }

    #[test]
    fn results_become_outcomes() {
        let ok: Result<i32, &str> = Ok(1);
        let err: Result<i32, &str> = Err("no");
        assert_eq!(ok.into_outcome(), Ok(Value::from(1)));
        assert_eq!(err.into_outcome(), Err(Value::from("no")));
        assert_eq!(().into_outcome(), Ok(Value::Undefined));
    }

    #[test]
    fn handler_wraps_closures() {
        let h = handler(|v: Value| v.as_number().map(|n| n * 2.0).ok_or("not a number"));
        assert_eq!(h.call(&[Value::from(4)]), Ok(Value::from(8)));
        assert_eq!(h.call(&[Value::from("x")]), Err(Value::from("not a number")));
    }
}
