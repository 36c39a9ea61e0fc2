//! Delay-based turn order.
//!
//! The schedule is a min-queue of `(due time, actor)` entries plus a
//! monotonic clock. An actor finishing an action is pushed back in with
//! the action's delay; popping the earliest entry advances the clock to
//! that entry's due time. `push_pop` is the loop primitive: reschedule
//! the actor that just acted, then hand back whoever is due next (which
//! may be the same actor, for a zero delay).
//!
//! Equal due times resolve in insertion order via a sequence counter, so
//! a replay of the same commands pops the same order every time.
//!
//! The schedule does not know about deaths: a dead actor's entry stays
//! queued, and the caller is expected to skip ids it can no longer
//! resolve.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::actors::ActorId;

/// Turn-order queue keyed by actor id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schedule {
    time: u64,
    next_seq: u64,
    queue: BinaryHeap<Entry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Entry {
    due: u64,
    seq: u64,
    actor: ActorId,
}

// Ordering ignores the actor: the queue is ordered by due time, then by
// insertion sequence. Reversed so BinaryHeap pops the earliest entry.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Schedule {
    /// An empty schedule at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current clock, in time units.
    ///
    /// Never decreases; advances to each popped entry's due time.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no entries are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue an actor `delay` time units from now.
    pub fn push(&mut self, actor: ActorId, delay: u64) {
        let entry = Entry {
            due: self.time + delay,
            seq: self.next_seq,
            actor,
        };
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Remove the earliest entry, advance the clock to it, return its actor.
    pub fn pop(&mut self) -> Option<ActorId> {
        let entry = self.queue.pop()?;
        self.time = entry.due;
        Some(entry.actor)
    }

    /// Reschedule `actor` with `delay`, then pop the next-due actor.
    ///
    /// A zero delay hands the same actor straight back unless an entry
    /// with an equal due time was queued before it.
    pub fn push_pop(&mut self, actor: ActorId, delay: u64) -> Option<ActorId> {
        self.push(actor, delay);
        self.pop()
    }
}
