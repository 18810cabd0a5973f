use aplus_core::{Promise, PromiseState, Runtime, Value};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Fulfill(i32),
    Reject(i32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<i32>().prop_map(Op::Fulfill), any::<i32>().prop_map(Op::Reject)]
}

fn apply(p: &Promise, op: &Op) -> bool {
    match op {
        Op::Fulfill(v) => p.fulfill(*v),
        Op::Reject(r) => p.reject(*r),
    }
}

proptest! {
    #[test]
    fn only_the_first_settlement_counts(ops in prop::collection::vec(arb_op(), 1..20)) {
        let p = Promise::new();
        let results: Vec<bool> = ops.iter().map(|op| apply(&p, op)).collect();

        prop_assert!(results[0]);
        prop_assert!(results[1..].iter().all(|r| !r));

        match (&ops[0], p.state()) {
            (Op::Fulfill(v), PromiseState::Fulfilled(got)) => {
                prop_assert_eq!(got, Value::from(*v));
            }
            (Op::Reject(r), PromiseState::Rejected(got)) => {
                prop_assert_eq!(got, Value::from(*r));
            }
            (op, state) => {
                prop_assert!(false, "{:?} left {:?}", op, state);
            }
        }
    }

    #[test]
    fn chains_propagate_untouched(depth in 1usize..30, v in any::<i32>(), reject in any::<bool>()) {
        let root = Promise::new();
        let mut tail = root.clone();
        for _ in 0..depth {
            tail = tail.then(None, None);
        }

        if reject { root.reject(v); } else { root.fulfill(v); }
        Runtime::current().run_until_idle();

        if reject {
            prop_assert_eq!(tail.reason(), Some(Value::from(v)));
        } else {
            prop_assert_eq!(tail.value(), Some(Value::from(v)));
        }
    }
}
