//=========================================================================
// Deferred Queue
//=========================================================================
//
// Two-phase commit buffer.
//
// Mutations requested while a collection is being iterated are pushed
// here and applied at the barrier that follows the iteration. Used for
// UI pushes issued from screen callbacks and for close/mode events that
// the scheduler consumes after a reap.
//
//   locked phase:  push() ... push()
//   barrier:       take()  → apply in FIFO order
//
//=========================================================================

//=== DeferredQueue =======================================================

/// FIFO buffer of requests awaiting the next barrier.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    queue: Vec<T>,
}

impl<T> DeferredQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Defers `item` to the next barrier.
    pub fn push(&mut self, item: T) {
        self.queue.push(item);
    }

    /// Returns an iterator over the deferred items, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes every deferred item, leaving the queue empty.
    ///
    /// Items pushed while the taken batch is being applied land in the
    /// (now empty) queue and wait for the following barrier.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.queue)
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
