//! Cancellable delayed tasks on a simulated clock.
//!
//! The engine never sleeps; it schedules payloads at future instants and the
//! host advances time. Every schedule call returns a [`TaskHandle`] so that
//! pending work can be cancelled deterministically on teardown.

use fnv::FnvHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    due: Duration,
    payload: T,
}

/// Min-heap of `(due, handle)` with lazy removal of cancelled entries.
///
/// Tasks due at the same instant run in scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BinaryHeap<Reverse<(Duration, TaskHandle)>>,
    pending: FnvHashMap<TaskHandle, Pending<T>>,
    next_handle: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            pending: FnvHashMap::default(),
            next_handle: 0,
        }
    }

    pub fn schedule_at(&mut self, due: Duration, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.push(Reverse((due, handle)));
        self.pending.insert(handle, Pending { due, payload });
        handle
    }

    /// Returns the payload if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.pending.remove(&handle).map(|p| p.payload)
    }

    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        self.queue.clear();
        n
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest live task.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TaskHandle, T)> {
        self.discard_cancelled();
        let Reverse((due, handle)) = *self.queue.peek()?;
        if due > now {
            return None;
        }
        self.queue.pop();
        let p = self.pending.remove(&handle)?;
        Some((p.due, handle, p.payload))
    }

    fn discard_cancelled(&mut self) {
        while let Some(Reverse((_, handle))) = self.queue.peek() {
            if self.pending.contains_key(handle) {
                break;
            }
            self.queue.pop();
        }
    }
}
