use std::cell::RefCell;
use std::sync::Arc;

mod job_queue;
mod options;

pub use job_queue::{Job, JobQueue};
pub use options::*;

use crate::debug::{debug, trace};

thread_local! {
    static APLUS_RUNTIME: RefCell<Option<Arc<Runtime>>> = const { RefCell::new(None) };
}

/// the deferred job queue ("next tick") of one thread.
///
/// promises look up the runtime attached to the calling thread whenever they
/// need to defer a notification. nothing runs until the owner drains the queue
/// with [`Runtime::run_until_idle`] or [`Runtime::run_once`].
pub struct Runtime {
    options: RuntimeOptions,
    jobs: JobQueue,
}

impl Runtime {
    pub fn new() -> Arc<Self> {
        Self::with_options(RuntimeOptions::default())
    }

    pub fn with_options(options: RuntimeOptions) -> Arc<Self> {
        Arc::new(Self {
            options,
            jobs: JobQueue::new(),
        })
    }

    /// makes this runtime the current one for the calling thread,
    /// returning the previously attached runtime if any
    pub fn attach(self: Arc<Self>) -> Option<Arc<Runtime>> {
        APLUS_RUNTIME.with(|rt| rt.borrow_mut().replace(self))
    }

    pub fn deattach() -> Option<Arc<Runtime>> {
        APLUS_RUNTIME.with(|rt| rt.borrow_mut().take())
    }

    pub fn is_attached() -> bool {
        APLUS_RUNTIME.with(|rt| rt.borrow().is_some())
    }

    /// the runtime attached to the calling thread.
    ///
    /// a default runtime is attached on first use when none is.
    #[inline]
    pub fn current() -> Arc<Runtime> {
        APLUS_RUNTIME.with(|rt| {
            rt.borrow_mut()
                .get_or_insert_with(|| {
                    debug!(thread = ?std::thread::current().id(), "attaching default runtime");
                    Runtime::new()
                })
                .clone()
        })
    }

    #[inline]
    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    #[inline]
    pub fn notify_mode(&self) -> NotifyMode {
        self.options.notify_mode
    }

    pub fn enqueue<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.jobs.push(Box::new(job));
        trace!(pending = self.jobs.len(), "job enqueued");
    }

    /// runs the oldest job, returning false when the queue was empty
    pub fn run_once(&self) -> bool {
        match self.jobs.pop() {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// runs jobs until the queue is empty, including jobs enqueued along the
    /// way, or until `max_jobs_per_drain` is reached. returns the number run.
    pub fn run_until_idle(&self) -> usize {
        let limit = self.options.max_jobs_per_drain.unwrap_or(usize::MAX);
        let mut ran = 0;

        while ran < limit && self.run_once() {
            ran += 1;
        }

        if ran > 0 {
            debug!(ran, left = self.jobs.len(), "job queue drained");
        }
        ran
    }

    #[inline]
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    #[inline]
    pub fn total_enqueued(&self) -> u64 {
        self.jobs.total_enqueued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn current_attaches_a_default() {
        Runtime::deattach();
        assert!(!Runtime::is_attached());
        let a = Runtime::current();
        assert!(Runtime::is_attached());
        let b = Runtime::current();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn attach_replaces_previous() {
        let first = Runtime::new();
        let second = Runtime::new();
        first.clone().attach();
        let old = second.clone().attach().unwrap();
        assert!(Arc::ptr_eq(&old, &first));
        assert!(Arc::ptr_eq(&Runtime::current(), &second));
        Runtime::deattach();
    }

    #[test]
    fn jobs_enqueued_while_draining_run_in_same_drain() {
        let rt = Runtime::new();
        let count = Arc::new(AtomicUsize::new(0));

        let rt2 = rt.clone();
        let c = count.clone();
        rt.enqueue(move || {
            c.fetch_add(1, Ordering::SeqCst);
            let c = c.clone();
            rt2.enqueue(move || {
                c.fetch_add(10, Ordering::SeqCst);
            });
        });

        assert_eq!(rt.pending_jobs(), 1);
        assert_eq!(rt.run_until_idle(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 11);
        assert_eq!(rt.total_enqueued(), 2);
    }

    #[test]
    fn drain_limit() {
        let rt = Runtime::with_options(RuntimeOptions::new().with_max_jobs_per_drain(Some(2)));
        for _ in 0..5 {
            rt.enqueue(|| {});
        }
        assert_eq!(rt.run_until_idle(), 2);
        assert_eq!(rt.pending_jobs(), 3);
        assert!(rt.run_once());
        assert_eq!(rt.pending_jobs(), 2);
    }
}
