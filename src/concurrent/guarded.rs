use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A value guarded by a mutex and a condition variable. All access goes
/// through closures holding the lock; every completed access broadcasts, so
/// [`Guarded::wait_until`] re-checks its predicate after any read or write.
///
/// Reads and writes on one cell are serialized; there is no ordering across
/// cells.
pub struct Guarded<T> {
    value: Mutex<T>,
    cond: Condvar,
}

impl<T> Guarded<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            cond: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        // A panicked accessor must not wedge every later one.
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with shared read access and returns its result.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.lock();
        let result = f(&guard);
        drop(guard);
        self.cond.notify_all();
        result
    }

    /// Runs `f` with exclusive access and returns its result.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        let result = f(&mut guard);
        drop(guard);
        self.cond.notify_all();
        result
    }

    /// Stores `value` only if it differs from the current one. Returns
    /// whether a write happened.
    pub fn set_if_differs(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut guard = self.lock();
        if *guard == value {
            return false;
        }
        *guard = value;
        drop(guard);
        self.cond.notify_all();
        true
    }

    /// Blocks the caller until `predicate` holds for the current value.
    pub fn wait_until(&self, mut predicate: impl FnMut(&T) -> bool) {
        let mut guard = self.lock();
        while !predicate(&guard) {
            guard = self
                .cond
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until `predicate` holds or `timeout` elapses. Returns whether
    /// the predicate held on exit.
    pub fn wait_until_for(
        &self,
        mut predicate: impl FnMut(&T) -> bool,
        timeout: Duration,
    ) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.lock();
        while !predicate(&guard) {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (next, _) = self
                .cond
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
        true
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
