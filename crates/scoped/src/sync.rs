//! Scoped lock guard
//!
//! Classic scoped locking over an externally owned mutex: construction
//! blocks until the lock is acquired, destruction releases it. The guard is
//! strictly scope-bound; it cannot be cloned or reassigned.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Holds an externally owned mutex for the guard's lifetime.
///
/// Acquisition is unconditional: there is no fallible or time-bounded
/// variant. A poisoned mutex is treated as acquired and its data handed
/// over; the panic that poisoned it happened on another thread and is not
/// this guard's failure to report.
pub struct ScopedLock<'m, T> {
    guard: MutexGuard<'m, T>,
}

impl<'m, T> ScopedLock<'m, T> {
    /// Block until `mutex` is acquired.
    pub fn new(mutex: &'m Mutex<T>) -> Self {
        let guard = mutex.lock().unwrap_or_else(PoisonError::into_inner);
        Self { guard }
    }
}

impl<T> std::ops::Deref for ScopedLock<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> std::ops::DerefMut for ScopedLock<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
