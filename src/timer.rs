//! Virtual clock and cancellable timer queue.
//!
//! The browser environment this runtime models delivers timer callbacks on
//! the single UI thread, run-to-completion, in due-time order. [`TimerQueue`]
//! reproduces that with a millisecond clock that only moves when the caller
//! advances it, which makes every timing property in the test suite exact
//! rather than flaky.
//!
//! Unlike the fire-and-forget `setTimeout` chains it replaces, every
//! scheduled task is addressed by a [`TimerId`] and can be cancelled. This is
//! what lets a re-submitted form abort its stale settle task and lets the
//! typing animation tear down mid-chain.
//!
//! Ties (two tasks due at the same instant) fire in schedule order.

use std::collections::BinaryHeap;

/// Cancellation token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    due: u64,
    seq: u64,
    id: TimerId,
    task: T,
}

// BinaryHeap is a max-heap; order by reversed (due, seq) so the earliest
// deadline pops first and same-instant tasks pop in schedule order.
impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl<T> Eq for Scheduled<T> {}

/// Millisecond-resolution timer queue over an explicit clock.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_seq: u64,
    heap: BinaryHeap<Scheduled<T>>,
    cancelled: Vec<TimerId>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            now: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            cancelled: Vec::new(),
        }
    }

    /// Current virtual time in ms since runtime start.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `task` to fire `delay_ms` from now. Returns its cancellation
    /// token.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_seq);
        self.heap.push(Scheduled {
            due: self.now + delay_ms,
            seq: self.next_seq,
            id,
            task,
        });
        self.next_seq += 1;
        id
    }

    /// Cancel a pending task. Cancelling an already-fired or already-cancelled
    /// timer is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.cancelled.push(id);
    }

    /// Move the clock forward by `delta_ms` without draining. The next
    /// [`pop_due`](Self::pop_due) calls return everything that became due.
    pub fn advance(&mut self, delta_ms: u64) {
        self.now += delta_ms;
    }

    /// Pop the earliest task due at or before the current clock, skipping
    /// cancelled entries. `None` when nothing (further) is due.
    pub fn pop_due(&mut self) -> Option<T> {
        while let Some(top) = self.heap.peek() {
            if top.due > self.now {
                return None;
            }
            let entry = self.heap.pop().expect("peeked entry present");
            if let Some(pos) = self.cancelled.iter().position(|c| *c == entry.id) {
                self.cancelled.swap_remove(pos);
                continue;
            }
            return Some(entry.task);
        }
        None
    }

    /// Earliest due time among live tasks. Lets a driver step the clock
    /// deadline-by-deadline so chained timers fire at their true times.
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap
            .iter()
            .filter(|s| !self.cancelled.contains(&s.id))
            .map(|s| s.due)
            .min()
    }

    /// Number of live (not cancelled) pending tasks.
    pub fn pending(&self) -> usize {
        self.heap
            .iter()
            .filter(|s| !self.cancelled.contains(&s.id))
            .count()
    }
}
