//! Deferred, frame-aligned actions.
//!
//! Each queued action is a plain record naming its target entity, the
//! operation, and the simulation time it becomes due. The engine drains
//! due records at the start of each active tick and checks that the
//! target still exists before applying anything, so actions aimed at
//! destroyed entities resolve to no-ops. Actions cannot be cancelled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hecs::Entity;

use blitz_core::constants::TIME_EPSILON;

/// Operation performed when a scheduled action comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Return the target's weapon to Ready.
    EndCooldown,
    /// Hide the target's muzzle flash.
    HideMuzzleFlash,
    /// Remove the target from the world.
    Despawn,
}

/// A queued action.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledAction {
    pub due_secs: f64,
    /// Insertion sequence; breaks ties between equal due times.
    pub seq: u64,
    pub target: Entity,
    pub action: DeferredAction,
}

impl PartialEq for ScheduledAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledAction {
    // Reversed so the BinaryHeap pops the earliest due action first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_secs
            .total_cmp(&self.due_secs)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of scheduled actions keyed by due time.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<ScheduledAction>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` on `target` to run once, `delay_secs` after `now_secs`.
    pub fn schedule(
        &mut self,
        target: Entity,
        action: DeferredAction,
        delay_secs: f64,
        now_secs: f64,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(ScheduledAction {
            due_secs: now_secs + delay_secs.max(0.0),
            seq,
            target,
            action,
        });
    }

    /// Remove and return every action due at or before `now_secs`, in
    /// due-time order (insertion order for equal due times).
    pub fn drain_due(&mut self, now_secs: f64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        while let Some(next) = self.queue.peek() {
            if next.due_secs > now_secs + TIME_EPSILON {
                break;
            }
            if let Some(action) = self.queue.pop() {
                due.push(action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending action.
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|a| a.due_secs)
    }
}
