//! Bounded FIFO latch connecting two adjacent pipeline stages.
//!
//! Grounded on the teacher's `IfId`/`IdEx`/`ExMem`/`MemWb` entry-vector
//! latches: a small buffer a producing stage appends to and a consuming
//! stage drains. This scheduler's latches carry instruction-log indices
//! rather than inline decode/execute state, and add the one operation the
//! teacher's latches never needed: `push_front`, for a stalled rename to
//! return an instruction to the head of its latch without losing its place
//! in program order.
//!
//! Nominal capacity is the issue width `W`, but pushes are never rejected:
//! a sustained rename stall (free-list exhaustion) can back the rename
//! latch up past `W` for many cycles, and the scheduler must keep accepting
//! decode's output rather than drop instructions. `capacity`/`is_full` are
//! informational, used by tests to assert the latch stays within budget
//! under normal (non-stalling) operation.

use std::collections::VecDeque;

/// A bounded-in-spirit FIFO between two pipeline stages, holding instruction
/// indices in program order.
#[derive(Debug)]
pub struct Latch<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> Latch<T> {
    /// Creates an empty latch with the given nominal capacity (normally the
    /// configured issue width).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// The nominal capacity this latch was sized for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the latch currently holds at least its nominal capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Whether the latch holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends `item` at the tail, the producing stage's normal push.
    pub fn push_back(&mut self, item: T) {
        self.entries.push_back(item);
    }

    /// Returns `item` to the head, used when a stage stalls partway through
    /// processing this latch and must hand the offending instruction back
    /// without disturbing the rest of the queue's order.
    pub fn push_front(&mut self, item: T) {
        self.entries.push_front(item);
    }

    /// Removes and returns the head entry, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// Drains every entry in order, for a stage with no per-cycle capacity
    /// check on its consumption (e.g. decode draining fully each cycle).
    pub fn drain_all(&mut self) -> std::collections::vec_deque::Drain<'_, T> {
        self.entries.drain(..)
    }
}
