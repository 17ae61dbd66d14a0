use std::error::Error;
use std::fmt;

/// Error for the [`try_push`](crate::BoundedBlockingQueue::try_push) method.
///
/// Contains the item that couldn't be pushed, so it isn't lost.
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum TryPushError<T> {
    /// The queue already held as many items as its capacity allows.
    Full(T),
}

/// Error for the [`push_timeout`](crate::BoundedBlockingQueue::push_timeout) method.
///
/// Contains the item that couldn't be pushed, so it isn't lost.
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum PushTimeoutError<T> {
    /// The queue stayed full until the timeout elapsed.
    Timeout(T),
}

/// Error for the [`try_pop`](crate::BoundedBlockingQueue::try_pop) method.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TryPopError {
    /// No item was popped because the queue was empty.
    Empty,
}

/// Error for the [`pop_timeout`](crate::BoundedBlockingQueue::pop_timeout) method.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PopTimeoutError {
    /// The queue stayed empty until the timeout elapsed.
    Timeout,
}

impl<T> TryPushError<T> {
    /// Returns the item that failed to push.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            TryPushError::Full(item) => item,
        }
    }
}

impl<T> PushTimeoutError<T> {
    /// Returns the item that failed to push.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            PushTimeoutError::Timeout(item) => item,
        }
    }
}

impl<T> Error for TryPushError<T> {}
impl<T> Error for PushTimeoutError<T> {}
impl Error for TryPopError {}
impl Error for PopTimeoutError {}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TryPushError::Full(_) => f.write_str("writing to a full queue"),
        }
    }
}

impl<T> fmt::Display for PushTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PushTimeoutError::Timeout(_) => f.write_str("timed out writing to a full queue"),
        }
    }
}

impl fmt::Display for TryPopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TryPopError::Empty => f.write_str("reading from an empty queue"),
        }
    }
}

impl fmt::Display for PopTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PopTimeoutError::Timeout => f.write_str("timed out reading from an empty queue"),
        }
    }
}

impl<T> fmt::Debug for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TryPushError::Full(_) => f.write_str("Full(..)"),
        }
    }
}

impl<T> fmt::Debug for PushTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PushTimeoutError::Timeout(_) => f.write_str("Timeout(..)"),
        }
    }
}
