use std::sync::Arc;

use aplus_core::{Runtime, RuntimeOptions};

/// runs `f` against a fresh runtime built from `options` and drains the job
/// queue before returning. the previously attached runtime, if any, is
/// restored afterwards, also when `f` panics.
pub fn run_to_completion<F, R>(options: RuntimeOptions, f: F) -> R
where
    F: FnOnce() -> R,
{
    let runtime = Runtime::with_options(options);
    let _restore = RestoreOnDrop(runtime.clone().attach());

    let re = f();
    runtime.run_until_idle();
    re
}

/// reattaches the held runtime, or detaches, when dropped
struct RestoreOnDrop(Option<Arc<Runtime>>);

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        match self.0.take() {
            Some(previous) => {
                previous.attach();
            }
            None => {
                Runtime::deattach();
            }
        }
    }
}
