//! Blocking-operation offload worker
//!
//! File and device operations truly block an OS thread for their full
//! duration, subprocess wait included. The runner makes that explicit:
//! one dedicated worker thread executes submitted closures one at a time,
//! and the result comes back through a completion channel. There is no
//! internal pool and no cancellation; dropping a handle abandons the
//! result but never aborts the operation.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Single-threaded operation runner
pub struct OpRunner {
    tx: Sender<Job>,
}

/// Completion handle for one submitted operation
pub struct OpHandle<T> {
    rx: Receiver<T>,
}

impl OpRunner {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<Job>();

        std::thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                job();
            }
            tracing::debug!("Operation worker shutting down");
        });

        Self { tx }
    }

    /// Queue one blocking operation; the returned handle delivers its
    /// result once the worker has run it to completion.
    pub fn submit<T, F>(&self, op: F) -> OpHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (done_tx, done_rx) = bounded(1);

        let job: Job = Box::new(move || {
            // The handle may have been dropped; the send failing is fine
            let _ = done_tx.send(op());
        });

        if self.tx.send(job).is_err() {
            tracing::error!("Operation worker is gone; dropping submission");
        }

        OpHandle { rx: done_rx }
    }
}

impl Default for OpRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OpHandle<T> {
    /// Block until the operation finishes
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Non-blocking poll, for UI frame loops
    pub fn try_result(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_submit_and_wait() {
        let runner = OpRunner::new();
        let handle = runner.submit(|| 40 + 2);
        assert_eq!(handle.wait(), Some(42));
    }

    #[test]
    fn test_operations_run_in_submission_order() {
        let runner = OpRunner::new();

        let slow = runner.submit(|| {
            std::thread::sleep(Duration::from_millis(50));
            "slow"
        });
        let fast = runner.submit(|| "fast");

        // The second op cannot finish before the first: one worker
        assert_eq!(slow.wait(), Some("slow"));
        assert_eq!(fast.wait(), Some("fast"));
    }

    #[test]
    fn test_try_result_before_completion() {
        let runner = OpRunner::new();
        let handle = runner.submit(|| {
            std::thread::sleep(Duration::from_millis(100));
            1
        });

        // Almost certainly still running
        let early = handle.try_result();
        assert!(early.is_none() || early == Some(1));
        assert_eq!(handle.wait(), Some(1));
    }
}
