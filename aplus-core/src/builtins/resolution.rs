//! thenable adoption.
//!
//! a promise fulfilled with a thenable follows the thenable's eventual outcome
//! instead of storing it. adoption re-enters `fulfill_at` with the thenable's
//! result, so nested thenables unwrap one level per hop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::debug::debug;
use crate::error::Error;
use crate::runtime::Runtime;
use crate::types::{Thenable, Value};

use super::function::Function;
use super::promise::{Promise, PromiseState};

impl Promise {
    /// `fulfill` with the number of adoptions already made on this chain
    pub(crate) fn fulfill_at(&self, value: Value, depth: usize) -> bool {
        if !self.is_pending() {
            return false;
        }

        match value.thenable() {
            Some(thenable) => {
                self.adopt(thenable, depth);
                false
            }
            None => self.settle(PromiseState::Fulfilled(value)),
        }
    }

    fn adopt(&self, thenable: Thenable, depth: usize) {
        let max_depth = Runtime::current().options().max_adoption_depth;
        if depth >= max_depth {
            debug!(promise = self.id(), depth, "adoption depth exceeded");
            self.reject(Error::AdoptionDepthExceeded { depth: max_depth });
            return;
        }

        if let Thenable::Native(target) = &thenable {
            if self.is_followed_by(target, max_depth) {
                debug!(promise = self.id(), target = target.id(), "cyclic adoption");
                self.reject(Error::CyclicResolution { id: self.id() });
                return;
            }
            self.set_adoption_target(Some(target));
        }

        debug!(promise = self.id(), depth, "adopting thenable");

        // only the first callback invoked counts, whatever the thenable does
        let called = Arc::new(AtomicBool::new(false));
        let (on_fulfilled, on_rejected) = self.resolving_functions(called.clone(), depth);

        match thenable {
            Thenable::Native(target) => {
                target.then(Some(on_fulfilled), Some(on_rejected));
            }
            Thenable::Foreign(then) => {
                let re = then.call(&[Value::Function(on_fulfilled), Value::Function(on_rejected)]);
                if let Err(thrown) = re {
                    if !called.swap(true, Ordering::SeqCst) {
                        self.reject(thrown);
                    }
                }
            }
        }
    }

    /// whether following `target`'s adoption chain leads back to this promise
    fn is_followed_by(&self, target: &Promise, limit: usize) -> bool {
        let mut next = Some(target.clone());
        let mut hops = 0;
        while let Some(p) = next {
            if p.ptr_eq(self) {
                return true;
            }
            hops += 1;
            if hops > limit {
                break;
            }
            next = p.adoption_target();
        }
        false
    }

    fn resolving_functions(&self, called: Arc<AtomicBool>, depth: usize) -> (Function, Function) {
        let target = self.clone();
        let once = called.clone();
        let on_fulfilled = Function::unary(move |value| {
            if !once.swap(true, Ordering::SeqCst) {
                target.fulfill_at(value, depth + 1);
            }
            Ok(Value::Undefined)
        });

        let target = self.clone();
        let on_rejected = Function::unary(move |reason| {
            if !called.swap(true, Ordering::SeqCst) {
                target.reject(reason);
            }
            Ok(Value::Undefined)
        });

        (on_fulfilled, on_rejected)
    }
}
