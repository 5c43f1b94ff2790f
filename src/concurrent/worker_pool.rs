use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::error;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PoolError {
    #[error("the worker pool has been terminated")]
    Terminated,
    #[error("the task was dropped before producing a result")]
    TaskLost,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

struct PoolState {
    queue: VecDeque<Job>,
    running: usize,
    paused: bool,
    terminated: bool,
}

struct PoolShared {
    state: Mutex<PoolState>,
    // Workers sleep on `work_ready`; `drain` sleeps on `all_idle`.
    work_ready: Condvar,
    all_idle: Condvar,
}

impl PoolShared {
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a submitted task's eventual result.
pub struct TaskHandle<T> {
    result: mpsc::Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task completes. Fails with [`PoolError::TaskLost`]
    /// if the task panicked or was cleared from the queue before running.
    pub fn wait(self) -> Result<T, PoolError> {
        self.result.recv().map_err(|_| PoolError::TaskLost)
    }
}

/// A fixed-size pool of worker threads consuming a FIFO task queue.
///
/// A paused pool keeps accepting submissions but executes nothing until
/// unpaused. `drain` is the synchronization point: it returns once no task
/// is running and none is queued. Panicking tasks are caught and logged;
/// the worker that ran them keeps serving the queue.
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Creates a pool sized to the available hardware parallelism.
    pub fn new() -> Self {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(threads: usize) -> Self {
        let threads = threads.max(1);
        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                running: 0,
                paused: false,
                terminated: false,
            }),
            work_ready: Condvar::new(),
            all_idle: Condvar::new(),
        });

        let workers = (0..threads)
            .map(|index| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("worker-{}", index))
                    .spawn(move || worker_loop(shared))
                    .expect("worker thread should spawn")
            })
            .collect();

        Self { shared, workers }
    }

    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Enqueues a task and returns a handle to its result.
    pub fn submit<T, F>(&self, task: F) -> Result<TaskHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        {
            let mut state = self.shared.lock();
            if state.terminated {
                return Err(PoolError::Terminated);
            }
            state.queue.push_back(Box::new(move || {
                let _ = sender.send(task());
            }));
        }
        self.shared.work_ready.notify_one();
        Ok(TaskHandle { result: receiver })
    }

    /// Pauses or resumes task execution. Queued tasks are retained.
    pub fn pause(&self, paused: bool) -> Result<(), PoolError> {
        {
            let mut state = self.shared.lock();
            if state.terminated {
                return Err(PoolError::Terminated);
            }
            if state.paused == paused {
                return Ok(());
            }
            state.paused = paused;
        }
        self.shared.work_ready.notify_all();
        Ok(())
    }

    /// Drops every task that has not started running.
    pub fn clear(&self) -> Result<(), PoolError> {
        let mut state = self.shared.lock();
        if state.terminated {
            return Err(PoolError::Terminated);
        }
        state.queue.clear();
        if state.running == 0 {
            self.shared.all_idle.notify_all();
        }
        Ok(())
    }

    /// Blocks until every worker is idle and the queue is empty.
    pub fn drain(&self) -> Result<(), PoolError> {
        let mut state = self.shared.lock();
        loop {
            if state.terminated {
                return Err(PoolError::Terminated);
            }
            if state.queue.is_empty() && state.running == 0 {
                return Ok(());
            }
            state = self
                .shared
                .all_idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Hard stop: pending tasks are dropped, running tasks finish their
    /// current step, and all workers exit. Subsequent submissions fail.
    pub fn terminate(&self) -> Result<(), PoolError> {
        {
            let mut state = self.shared.lock();
            if state.terminated {
                return Err(PoolError::Terminated);
            }
            state.terminated = true;
            state.queue.clear();
        }
        self.shared.work_ready.notify_all();
        self.shared.all_idle.notify_all();
        Ok(())
    }

    pub fn pending_tasks(&self) -> usize {
        self.shared.lock().queue.len()
    }
}

fn worker_loop(shared: Arc<PoolShared>) {
    loop {
        let job = {
            let mut state = shared.lock();
            loop {
                if state.terminated {
                    return;
                }
                if !state.paused {
                    if let Some(job) = state.queue.pop_front() {
                        state.running += 1;
                        break job;
                    }
                }
                state = shared
                    .work_ready
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("worker task panicked; recovering");
        }

        let mut state = shared.lock();
        state.running -= 1;
        if state.running == 0 && state.queue.is_empty() {
            shared.all_idle.notify_all();
        }
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        let _ = self.terminate();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
