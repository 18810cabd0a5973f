//! a slice of the Promise/A+ suite expressed against the adapter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use aplus::{
    fulfilled, handler, pending, rejected, run_to_completion, thenable_value, CustomThenable,
    Function, NotifyMode, Promise, RuntimeOptions, Value,
};

fn run<R>(f: impl FnOnce() -> R) -> R {
    run_to_completion(RuntimeOptions::default(), f)
}

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Function) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let make = move |tag: &str| {
        let sink = sink.clone();
        let tag = tag.to_string();
        handler(move |v: Value| {
            sink.lock().unwrap().push(format!("{tag}:{v}"));
            v
        })
    };
    (log, make)
}

#[test]
fn two_point_one_state_transitions() {
    let d = pending();
    d.fulfill("first");
    d.reject("second");
    assert_eq!(d.promise.value(), Some(Value::from("first")));

    let d = pending();
    d.reject("first");
    d.fulfill("second");
    assert_eq!(d.promise.reason(), Some(Value::from("first")));
}

#[test]
fn two_point_two_handlers_called_once_in_order() {
    let (log, make) = recorder();
    run(|| {
        let d = pending();
        d.promise.on_fulfilled(make("a"));
        d.promise.on_fulfilled(make("b"));
        d.promise.catch(make("never"));
        d.fulfill(1);
        d.fulfill(2);
    });
    assert_eq!(*log.lock().unwrap(), vec!["a:1", "b:1"]);
}

#[test]
fn two_point_two_four_not_called_before_then_returns() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    run(|| {
        fulfilled(0).on_fulfilled(handler(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn two_point_two_seven_non_function_handlers_are_ignored() {
    let derived = run(|| {
        rejected("r")
            .then_values(Value::from(5), Value::Null)
            .then_values(Value::from("x"), Value::Undefined)
    });
    assert_eq!(derived.reason(), Some(Value::from("r")));
}

#[test]
fn two_point_two_seven_handler_errors_reject_the_derived_promise() {
    let derived = run(|| {
        fulfilled(1).on_fulfilled(handler(|_| Err::<Value, _>("thrown")))
    });
    assert_eq!(derived.reason(), Some(Value::from("thrown")));

    let recovered = run(|| rejected("e").catch(handler(|r: Value| format!("caught {r}"))));
    assert_eq!(recovered.value(), Some(Value::from("caught e")));
}

struct Later {
    settle: Arc<Mutex<Option<(Function, Function)>>>,
}

impl CustomThenable for Later {
    fn then(&self, on_fulfilled: Function, on_rejected: Function) -> Result<(), Value> {
        *self.settle.lock().unwrap() = Some((on_fulfilled, on_rejected));
        Ok(())
    }
}

#[test]
fn two_point_three_adopts_custom_thenables() {
    let slot = Arc::new(Mutex::new(None));
    let later = thenable_value(Later {
        settle: slot.clone(),
    });

    let derived = run(|| fulfilled(0).on_fulfilled(handler(move |_| later.clone())));
    assert!(derived.is_pending());

    let (on_fulfilled, on_rejected) = slot.lock().unwrap().take().unwrap();
    run(|| {
        on_fulfilled.call(&[Value::from("eventually")]).unwrap();
        on_rejected.call(&[Value::from("ignored")]).unwrap();
    });
    assert_eq!(derived.value(), Some(Value::from("eventually")));
}

#[test]
fn resolver_pair_settles_the_deferred() {
    let d = pending();
    let (resolve, reject) = d.resolver();
    let chained = run(|| {
        let chained = d.promise.on_fulfilled(handler(|v: Value| v));
        assert_eq!(resolve.call(&[Value::from("direct")]), Ok(Value::Bool(true)));
        assert_eq!(reject.call(&[Value::from("late")]), Ok(Value::Bool(false)));
        chained
    });
    assert_eq!(chained.value(), Some(Value::from("direct")));
}

#[test]
fn synchronous_mode_still_defers_late_registration() {
    let opts = RuntimeOptions::new().with_notify_mode(NotifyMode::Synchronous);
    let (log, make) = recorder();
    run_to_completion(opts, || {
        let d = pending();
        d.promise.on_fulfilled(make("early"));
        d.fulfill("v");
        assert_eq!(*log.lock().unwrap(), vec!["early:v"]);

        Promise::resolved("w").on_fulfilled(make("late"));
        assert_eq!(log.lock().unwrap().len(), 1);
    });
    assert_eq!(*log.lock().unwrap(), vec!["early:v", "late:w"]);
}
