use crate::error::{PopTimeoutError, PushTimeoutError, TryPopError, TryPushError};
use crate::sync::{Condvar, Mutex};
use crate::util::lock::{into_inner, lock, lock_pair, wait, wait_timeout};
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::ptr;
use std::time::{Duration, Instant};
use tracing::trace;

mod state;
use state::State;

/// The capacity of a queue that never fills up.
pub const UNBOUNDED: usize = usize::MAX;

/// A bounded, thread-safe FIFO queue.
///
/// All operations go through a single mutex. Threads that can't make
/// progress park on one of two condition variables: producers wait for
/// the queue to stop being full, consumers wait for it to stop being empty.
/// Every wait re-checks its condition on wake-up, so spurious wake-ups and
/// other threads stealing a freed slot or a fresh item are harmless.
///
/// Items are popped in exactly the order they were pushed. When several
/// producers (or consumers) are blocked at once, which one goes first is
/// up to the OS scheduler.
///
/// Share it between threads with an [`Arc`](std::sync::Arc).
///
/// # Zero capacity
///
/// A capacity of 0 is accepted, but nothing can ever be pushed:
/// [`push`](Self::push) blocks forever, [`try_push`](Self::try_push) always fails
/// and [`push_timeout`](Self::push_timeout) always times out.
pub struct BoundedBlockingQueue<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BoundedBlockingQueue<T> {
    /// Creates an empty queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self::from_state(State::new(capacity))
    }

    /// Creates an empty queue with an [`UNBOUNDED`] capacity.
    pub fn unbounded() -> Self {
        Self::new(UNBOUNDED)
    }

    fn from_state(state: State<T>) -> Self {
        Self {
            state: Mutex::new(state),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Checks if the queue is empty.
    ///
    /// Only blocks while another thread holds the queue's lock.
    pub fn is_empty(&self) -> bool {
        lock(&self.state).is_empty()
    }

    /// Returns the number of items in the queue.
    pub fn len(&self) -> usize {
        lock(&self.state).buffer.len()
    }

    /// Returns the maximum number of items the queue can hold.
    pub fn capacity(&self) -> usize {
        lock(&self.state).capacity
    }

    /// Pushes an item to the back of the queue.
    ///
    /// If the queue is full, blocks until a consumer makes room.
    /// There's no way to cancel the wait, use [`push_timeout`](Self::push_timeout)
    /// or [`try_push`](Self::try_push) if that's needed.
    pub fn push(&self, item: T) {
        let mut state = lock(&self.state);
        while state.is_full() {
            trace!(capacity = state.capacity, "queue full, parking producer");
            state = wait(&self.not_full, state);
        }
        state.buffer.push_back(item);
        drop(state);
        self.not_empty.notify_one();
    }

    /// Tries to push an item without blocking.
    ///
    /// Fails with [`TryPushError::Full`] if the queue is full, leaving the
    /// queue unchanged and handing the item back.
    pub fn try_push(&self, item: T) -> Result<(), TryPushError<T>> {
        lock(&self.state)
            .try_enqueue(item)
            .map_err(TryPushError::Full)?;
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pushes an item, waiting at most `timeout` for the queue to have room.
    ///
    /// Fails with [`PushTimeoutError::Timeout`] if the queue stayed full,
    /// handing the item back. A zero `timeout` makes this behave like
    /// [`try_push`](Self::try_push).
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = lock(&self.state);
        while state.is_full() {
            match remaining(deadline) {
                Some(left) => state = wait_timeout(&self.not_full, state, left),
                None => {
                    trace!(?timeout, "timed out waiting for room in the queue");
                    return Err(PushTimeoutError::Timeout(item));
                }
            }
        }
        state.buffer.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pops the item at the front of the queue.
    ///
    /// If the queue is empty, blocks until a producer pushes something.
    pub fn pop(&self) -> T {
        let mut state = lock(&self.state);
        let item = loop {
            match state.dequeue() {
                Some(item) => break item,
                None => {
                    trace!("queue empty, parking consumer");
                    state = wait(&self.not_empty, state);
                }
            }
        };
        drop(state);
        self.not_full.notify_one();
        item
    }

    /// Tries to pop the front item without blocking.
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        let item = lock(&self.state).dequeue().ok_or(TryPopError::Empty)?;
        self.not_full.notify_one();
        Ok(item)
    }

    /// Pops the front item, waiting at most `timeout` for one to arrive.
    ///
    /// Fails with [`PopTimeoutError::Timeout`] if the queue stayed empty.
    /// The call never returns the error before `timeout` has elapsed.
    /// A zero `timeout` makes this behave like [`try_pop`](Self::try_pop).
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = lock(&self.state);
        let item = loop {
            if let Some(item) = state.dequeue() {
                break item;
            }
            match remaining(deadline) {
                Some(left) => state = wait_timeout(&self.not_empty, state, left),
                None => {
                    trace!(?timeout, "timed out waiting for an item");
                    return Err(PopTimeoutError::Timeout);
                }
            }
        };
        drop(state);
        self.not_full.notify_one();
        Ok(item)
    }

    /// Moves this queue's items and capacity into a new queue.
    ///
    /// `self` is left empty with an [`UNBOUNDED`] capacity, so producers
    /// blocked on it are released and push into the emptied queue.
    ///
    /// Holds the lock for the whole transfer.
    pub fn take(&self) -> Self {
        let mut state = lock(&self.state);
        let taken = mem::replace(&mut *state, State::new(UNBOUNDED));
        trace!(len = taken.buffer.len(), "moved out of queue");
        self.not_full.notify_all();
        drop(state);
        Self::from_state(taken)
    }

    /// Moves `source`'s items and capacity into `self`.
    ///
    /// The items previously in `self` are dropped and `source` is left
    /// empty with an [`UNBOUNDED`] capacity. Threads blocked on either
    /// queue are woken if the new contents let them proceed.
    /// Does nothing if `source` is `self`.
    ///
    /// Both locks are held for the whole transfer. They're always taken in
    /// the same order, so `a.take_from(&b)` racing with `b.take_from(&a)`
    /// can't deadlock.
    pub fn take_from(&self, source: &Self) {
        if ptr::eq(self, source) {
            trace!("queue moved into itself, nothing to do");
            return;
        }
        let (mut dst, mut src) = lock_pair(&self.state, &source.state);
        let moved = mem::replace(&mut *src, State::new(UNBOUNDED));
        let replaced = mem::replace(&mut *dst, moved);
        trace!(len = dst.buffer.len(), "moved between queues");
        self.wake_waiters(&dst);
        source.not_full.notify_all();
        drop((dst, src));
        // user drop code runs outside the locks
        drop(replaced);
    }

    /// Consumes the queue, returning the remaining items in FIFO order.
    pub fn into_inner(self) -> VecDeque<T> {
        into_inner(self.state).buffer
    }

    /// Wakes everyone who might be able to proceed after the whole state
    /// was replaced.
    fn wake_waiters(&self, state: &State<T>) {
        if !state.is_empty() {
            self.not_empty.notify_all();
        }
        if !state.is_full() {
            self.not_full.notify_all();
        }
    }
}

impl<T: Clone> BoundedBlockingQueue<T> {
    /// Replaces `self`'s items and capacity with copies of `source`'s.
    ///
    /// Does nothing if `source` is `self`. Threads blocked on `self` are
    /// woken before its lock is released if the copied contents let them
    /// proceed.
    ///
    /// Both locks are held for the whole copy, stalling every other user
    /// of either queue, so keep this off hot paths. The locks are always
    /// taken in the same order, so `a.assign_from(&b)` racing with
    /// `b.assign_from(&a)` can't deadlock.
    pub fn assign_from(&self, source: &Self) {
        if ptr::eq(self, source) {
            trace!("queue assigned to itself, nothing to do");
            return;
        }
        let (mut dst, src) = lock_pair(&self.state, &source.state);
        // a panicking clone leaves `dst` untouched
        let replaced = mem::replace(&mut *dst, State::clone(&src));
        trace!(len = dst.buffer.len(), "copied between queues");
        self.wake_waiters(&dst);
        drop((dst, src));
        drop(replaced);
    }
}

/// Copies the queue's items and capacity.
///
/// The source is locked for the whole copy, so the result is a consistent
/// snapshot, but every other user of the source is stalled meanwhile.
impl<T: Clone> Clone for BoundedBlockingQueue<T> {
    fn clone(&self) -> Self {
        Self::from_state(State::clone(&lock(&self.state)))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source)
    }
}

impl<T> Default for BoundedBlockingQueue<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("BoundedBlockingQueue")
            .field("len", &state.buffer.len())
            .field("capacity", &state.capacity)
            .finish()
    }
}

/// Time left until `deadline`, or `None` once it has passed.
///
/// A `None` deadline (the timeout overflowed `Instant`) never passes.
fn remaining(deadline: Option<Instant>) -> Option<Duration> {
    match deadline {
        Some(deadline) => {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                None
            } else {
                Some(left)
            }
        }
        None => Some(Duration::MAX),
    }
}
