use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

/// a unit of deferred work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// FIFO of deferred jobs. jobs pushed while draining run in the same drain.
pub struct JobQueue {
    sender: Sender<Job>,
    receiver: Receiver<Job>,
    enqueued: AtomicU64,
}

impl JobQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            enqueued: AtomicU64::new(0),
        }
    }

    pub fn push(&self, job: Job) {
        // the receiver lives as long as self, so sending cannot fail
        if self.sender.send(job).is_ok() {
            self.enqueued.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn pop(&self) -> Option<Job> {
        match self.receiver.try_recv() {
            Ok(job) => Some(job),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// jobs ever pushed, including those already run
    #[inline]
    pub fn total_enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
