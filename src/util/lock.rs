use crate::sync::{Condvar, Mutex, MutexGuard};
use std::sync::PoisonError;
use std::time::Duration;

/*Poison is ignored everywhere in this module.
 *The only code that can panic under a queue lock is a user `Clone`
 *impl, which runs before any state is replaced, so a poisoned
 *state is still a consistent one.
 */

#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}

/// Waits for at most `timeout`.
///
/// Doesn't report whether the wait timed out, callers are expected
/// to re-check both their predicate and their deadline on return.
#[inline]
pub(crate) fn wait_timeout<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout: Duration,
) -> MutexGuard<'a, T> {
    match condvar.wait_timeout(guard, timeout) {
        Ok((guard, _)) => guard,
        Err(poisoned) => poisoned.into_inner().0,
    }
}

pub(crate) fn into_inner<T>(mutex: Mutex<T>) -> T {
    mutex.into_inner().unwrap_or_else(PoisonError::into_inner)
}

/// Locks two distinct mutexes, always in ascending address order.
///
/// Two threads calling `lock_pair(a, b)` and `lock_pair(b, a)` concurrently
/// agree on which lock comes first, so they can't end up in a circular wait.
/// The guards are returned in argument order regardless.
///
/// The caller must make sure `first` and `second` aren't the same mutex,
/// locking it twice would deadlock.
pub(crate) fn lock_pair<'a, T>(
    first: &'a Mutex<T>,
    second: &'a Mutex<T>,
) -> (MutexGuard<'a, T>, MutexGuard<'a, T>) {
    debug_assert!(
        !std::ptr::eq(first, second),
        "lock_pair called with the same mutex twice."
    );
    if address(first) < address(second) {
        let first = lock(first);
        let second = lock(second);
        (first, second)
    } else {
        let second = lock(second);
        let first = lock(first);
        (first, second)
    }
}

#[inline(always)]
fn address<T>(mutex: &Mutex<T>) -> usize {
    mutex as *const Mutex<T> as usize
}
