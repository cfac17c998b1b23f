//! Worker pool for concurrent processing with backpressure.
//!
//! Spawns N persistent tokio tasks that pull work items from a bounded
//! async-channel. Submission blocks once every worker is busy and the
//! queue is full, giving natural backpressure.
//!
//! Uses `async-channel` for work distribution — its `Receiver` is `Clone`,
//! so each worker gets its own handle with no `Mutex` needed. This avoids
//! the `Arc<Mutex<mpsc::Receiver>>` anti-pattern where one worker holds the
//! lock while blocked on `recv()`, starving all others.
//!
//! The pool promises bounded concurrency and cooperative shutdown, nothing
//! more: cancellation abandons queued work, and failure handling belongs to
//! the task itself. There is no per-task retry, timeout, or result channel.

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Worker count used when none is configured.
const DEFAULT_WORKERS: usize = 5;

/// A unit of work processed by the pool.
///
/// `process` runs synchronously on whichever worker dequeues the task. A
/// task that needs to report an outcome carries its own channel or shared
/// state.
pub trait Task: Send + 'static {
    fn process(&mut self);
}

/// A fixed-size pool of workers draining a bounded task queue.
///
/// # Example
///
/// ```ignore
/// let pool = WorkerPool::new(tasks).with_workers(4);
/// pool.run().await;
/// ```
pub struct WorkerPool<T: Task> {
    tasks: Vec<T>,
    workers: usize,
    cancel: watch::Receiver<bool>,
}

impl<T: Task> WorkerPool<T> {
    /// Create a pool over the given tasks with the default worker count
    /// and no external cancellation signal.
    pub fn new(tasks: Vec<T>) -> Self {
        let (_tx, rx) = watch::channel(false);
        Self {
            tasks,
            workers: DEFAULT_WORKERS,
            cancel: rx,
        }
    }

    /// Override the number of workers (which is also the queue capacity).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Attach a cancellation signal: a watch channel whose value flips to
    /// `true`. Workers observe it between tasks and exit early, abandoning
    /// anything still queued.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run all tasks to completion or cancellation.
    ///
    /// Returns once every submitted task has been dequeued and the queue
    /// closed, or once cancellation has propagated to every worker.
    pub async fn run(self) {
        let WorkerPool {
            tasks,
            workers,
            cancel,
        } = self;

        let (work_tx, work_rx) = async_channel::bounded::<T>(workers);

        // Spawn workers — each gets a cloned Receiver (no Mutex needed).
        let handles: Vec<JoinHandle<()>> = (0..workers)
            .map(|_| {
                let work_rx = work_rx.clone();
                let mut cancel = cancel.clone();
                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            biased;
                            _ = cancelled(&mut cancel) => break,
                            task = work_rx.recv() => match task {
                                Ok(mut task) => task.process(),
                                // Channel closed (sender dropped) → queue drained.
                                Err(_) => break,
                            },
                        }
                    }
                })
            })
            .collect();
        drop(work_rx);

        // Submit with backpressure; a full queue blocks here until a worker
        // frees a slot.
        let total = tasks.len();
        let mut submitted = 0usize;
        let mut submit_cancel = cancel.clone();
        for task in tasks {
            let aborted = tokio::select! {
                biased;
                _ = cancelled(&mut submit_cancel) => true,
                sent = work_tx.send(task) => sent.is_err(),
            };
            if aborted {
                log::debug!("worker pool cancelled with {submitted} of {total} task(s) submitted");
                break;
            }
            submitted += 1;
        }
        drop(work_tx); // closes the queue; workers drain what's left and stop

        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// Resolve when the cancellation flag flips to true. If the sender side is
/// gone without ever signalling, park forever so the select arm never
/// fires.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "tests/worker_pool_tests.rs"]
mod tests;
