//! the three entry points a Promise/A+ compliance suite drives.

use aplus_core::{Function, Promise, Value};

/// a promise already fulfilled with `value`
pub fn fulfilled<V: Into<Value>>(value: V) -> Promise {
    Promise::resolved(value)
}

/// a promise already rejected with `reason`
pub fn rejected<V: Into<Value>>(reason: V) -> Promise {
    Promise::rejected(reason)
}

/// a pending promise together with the means to settle it
pub fn pending() -> Deferred {
    Deferred {
        promise: Promise::new(),
    }
}

#[derive(Clone, Debug)]
pub struct Deferred {
    pub promise: Promise,
}

impl Deferred {
    /// settles the promise; false once it has already been settled
    pub fn fulfill<V: Into<Value>>(&self, value: V) -> bool {
        self.promise.fulfill(value)
    }

    pub fn reject<V: Into<Value>>(&self, reason: V) -> bool {
        self.promise.reject(reason)
    }

    /// the resolve/reject pair as callable values, returning the settle result
    pub fn resolver(&self) -> (Function, Function) {
        let p = self.promise.clone();
        let resolve = Function::unary(move |v| Ok(Value::Bool(p.fulfill(v))));
        let p = self.promise.clone();
        let reject = Function::unary(move |r| Ok(Value::Bool(p.reject(r))));
        (resolve, reject)
    }
}
