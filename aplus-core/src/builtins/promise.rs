use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::debug::{debug, trace};
use crate::error::Error;
use crate::runtime::{NotifyMode, Runtime};
use crate::types::Value;

use super::function::Function;

static NEXT_PROMISE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub enum PromiseState {
    #[default]
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

impl PromiseState {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// one `then` registration: the derived promise and the handlers deciding
/// how it settles
pub(crate) struct Continuation {
    pub(crate) derived: Promise,
    pub(crate) on_fulfilled: Option<Function>,
    pub(crate) on_rejected: Option<Function>,
    /// runtime of the registering thread; notifications are queued there
    runtime: Weak<Runtime>,
}

impl Continuation {
    pub(crate) fn new(
        derived: Promise,
        on_fulfilled: Option<Function>,
        on_rejected: Option<Function>,
    ) -> Self {
        Self {
            derived,
            on_fulfilled,
            on_rejected,
            runtime: Arc::downgrade(&Runtime::current()),
        }
    }

    /// the registering runtime, or the caller's when that one is gone
    fn runtime(&self) -> Arc<Runtime> {
        self.runtime.upgrade().unwrap_or_else(Runtime::current)
    }
}

struct PromiseCell {
    state: PromiseState,
    children: Vec<Continuation>,
    /// the native promise this one is following, while pending
    adopting: Option<Weak<PromiseInner>>,
}

struct PromiseInner {
    id: u64,
    cell: Mutex<PromiseCell>,
}

/// a single-assignment future value.
///
/// cloning yields another handle to the same promise. state changes happen
/// under a lock that is never held while user code runs, so handlers may
/// freely call back into the promise.
#[derive(Clone)]
pub struct Promise {
    inner: Arc<PromiseInner>,
}

impl Promise {
    /// a pending promise
    pub fn new() -> Self {
        let id = NEXT_PROMISE_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Arc::new(PromiseInner {
                id,
                cell: Mutex::new(PromiseCell {
                    state: PromiseState::Pending,
                    children: Vec::new(),
                    adopting: None,
                }),
            }),
        }
    }

    /// constructor taking an optional value and an optional reason.
    ///
    /// a reason may only be combined with an absent or nullish value.
    pub fn with(value: Option<Value>, reason: Option<Value>) -> Result<Self, Error> {
        let promise = Self::new();
        match (value, reason) {
            (None, None) => {}
            (Some(value), None) => {
                promise.fulfill(value);
            }
            (value, Some(reason)) => {
                if value.map_or(false, |v| !v.is_nullish()) {
                    return Err(Error::ValueAndReason);
                }
                promise.reject(reason);
            }
        }
        Ok(promise)
    }

    /// a promise fulfilled with `value`, or adopting it when it is thenable
    pub fn resolved<V: Into<Value>>(value: V) -> Self {
        let promise = Self::new();
        promise.fulfill(value.into());
        promise
    }

    pub fn rejected<V: Into<Value>>(reason: V) -> Self {
        let promise = Self::new();
        promise.reject(reason.into());
        promise
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Promise) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn state(&self) -> PromiseState {
        self.inner.cell.lock().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.cell.lock().state.is_pending()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.inner.cell.lock().state.is_fulfilled()
    }

    pub fn is_rejected(&self) -> bool {
        self.inner.cell.lock().state.is_rejected()
    }

    /// the fulfillment value, once fulfilled
    pub fn value(&self) -> Option<Value> {
        match &self.inner.cell.lock().state {
            PromiseState::Fulfilled(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// the rejection reason, once rejected
    pub fn reason(&self) -> Option<Value> {
        match &self.inner.cell.lock().state {
            PromiseState::Rejected(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// number of continuations waiting for settlement
    pub fn pending_continuations(&self) -> usize {
        self.inner.cell.lock().children.len()
    }

    /// fulfills the promise.
    ///
    /// returns false when already settled. a thenable value is adopted instead
    /// of stored; the promise then stays pending and false is returned too.
    pub fn fulfill<V: Into<Value>>(&self, value: V) -> bool {
        self.fulfill_at(value.into(), 0)
    }

    /// rejects the promise. the reason is stored as is, thenable or not.
    pub fn reject<V: Into<Value>>(&self, reason: V) -> bool {
        self.settle(PromiseState::Rejected(reason.into()))
    }

    /// registers handlers and returns the derived promise.
    ///
    /// notifications are queued on the runtime of the calling thread, whichever
    /// thread later settles the receiver. when the receiver is already settled
    /// the notification is queued right away, so handlers never run inside
    /// this call.
    pub fn then(&self, on_fulfilled: Option<Function>, on_rejected: Option<Function>) -> Promise {
        let derived = Promise::new();
        let child = Continuation::new(derived.clone(), on_fulfilled, on_rejected);

        let mut cell = self.inner.cell.lock();
        if cell.state.is_pending() {
            cell.children.push(child);
            trace!(promise = self.id(), derived = derived.id(), "continuation queued");
            return derived;
        }
        drop(cell);

        let runtime = child.runtime();
        let this = self.clone();
        runtime.enqueue(move || this.notify(child));
        trace!(promise = self.id(), derived = derived.id(), "continuation deferred");
        derived
    }

    /// `then` taking arbitrary values; anything that is not a function counts
    /// as an omitted handler
    pub fn then_values(&self, on_fulfilled: Value, on_rejected: Value) -> Promise {
        self.then(
            on_fulfilled.as_function().cloned(),
            on_rejected.as_function().cloned(),
        )
    }

    pub fn on_fulfilled(&self, f: Function) -> Promise {
        self.then(Some(f), None)
    }

    pub fn catch(&self, on_rejected: Function) -> Promise {
        self.then(None, Some(on_rejected))
    }

    /// the pending native promise this one is currently adopting
    pub(crate) fn adoption_target(&self) -> Option<Promise> {
        let cell = self.inner.cell.lock();
        let inner = cell.adopting.as_ref()?.upgrade()?;
        Some(Promise { inner })
    }

    pub(crate) fn set_adoption_target(&self, target: Option<&Promise>) {
        self.inner.cell.lock().adopting = target.map(|t| Arc::downgrade(&t.inner));
    }

    /// moves a pending promise to `state` and delivers its continuations.
    ///
    /// each continuation is notified through the runtime it was registered on.
    /// consecutive deferred continuations sharing a runtime go out as one job.
    pub(crate) fn settle(&self, state: PromiseState) -> bool {
        let children = {
            let mut cell = self.inner.cell.lock();
            if cell.state.is_settled() {
                return false;
            }
            cell.state = state;
            cell.adopting = None;
            debug!(promise = self.id(), state = cell.state.label(), "settled");
            std::mem::take(&mut cell.children)
        };

        let mut batch: Vec<Continuation> = Vec::new();
        let mut batch_runtime: Option<Arc<Runtime>> = None;

        for child in children {
            let runtime = child.runtime();
            if runtime.notify_mode() == NotifyMode::Synchronous {
                self.flush(batch_runtime.take(), std::mem::take(&mut batch));
                self.notify(child);
                continue;
            }

            let same = batch_runtime
                .as_ref()
                .map_or(false, |current| Arc::ptr_eq(current, &runtime));
            if !same {
                self.flush(batch_runtime.replace(runtime), std::mem::take(&mut batch));
            }
            batch.push(child);
        }
        self.flush(batch_runtime, batch);
        true
    }

    /// queues one job notifying `batch` in order
    fn flush(&self, runtime: Option<Arc<Runtime>>, batch: Vec<Continuation>) {
        let Some(runtime) = runtime else {
            return;
        };
        if batch.is_empty() {
            return;
        }
        let this = self.clone();
        runtime.enqueue(move || {
            for child in batch {
                this.notify(child);
            }
        });
    }

    /// settles the derived promise of `child` from this promise's outcome
    pub(crate) fn notify(&self, child: Continuation) {
        let (handler, payload, fulfilled) = match self.state() {
            PromiseState::Fulfilled(value) => (child.on_fulfilled, value, true),
            PromiseState::Rejected(reason) => (child.on_rejected, reason, false),
            PromiseState::Pending => return,
        };

        let derived = child.derived;
        match handler {
            None if fulfilled => {
                derived.fulfill(payload);
            }
            None => {
                derived.reject(payload);
            }
            Some(handler) => match handler.call(&[payload]) {
                Ok(result) => {
                    derived.fulfill(result);
                }
                Err(thrown) => {
                    trace!(promise = derived.id(), "handler threw");
                    derived.reject(thrown);
                }
            },
        }
    }
}

impl Default for Promise {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Promise({})", self.id())
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            PromiseState::Pending => write!(f, "Promise({}) <pending>", self.id()),
            PromiseState::Fulfilled(v) => write!(f, "Promise({}) <fulfilled: {:?}>", self.id(), v),
            PromiseState::Rejected(r) => write!(f, "Promise({}) <rejected: {:?}>", self.id(), r),
        }
    }
}
