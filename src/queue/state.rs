use std::collections::VecDeque;

/// Upper bound for the buffer allocated up front, so huge or
/// [`UNBOUNDED`](super::UNBOUNDED) capacities don't reserve memory eagerly.
const PREALLOC_LIMIT: usize = 1024;

/// Everything guarded by a queue's lock.
#[derive(Clone)]
pub(super) struct State<T> {
    pub(super) buffer: VecDeque<T>,
    pub(super) capacity: usize,
}

impl<T> State<T> {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// `>=` rather than `==` keeps producers parked even if the
    /// buffer somehow outgrew the capacity.
    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Appends `item` if there's room, handing it back otherwise.
    #[inline]
    pub(super) fn try_enqueue(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.buffer.push_back(item);
        Ok(())
    }

    #[inline]
    pub(super) fn dequeue(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }
}
