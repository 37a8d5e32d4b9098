//! Time-ordered queue of pending schedule requests.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tokio::sync::Mutex;

use threadgate_types::ScheduleRequest;

/// Pending requests, sorted ascending by publish time, insertion order
/// on ties.
///
/// The structure itself carries no lock; share it as a [`SharedQueue`]
/// and hold the mutex for the whole of each read-modify-write sequence.
/// In particular the scheduler must keep the lock from the moment it
/// identifies a due head until that head is popped.
#[derive(Debug, Default)]
pub struct ScheduleQueue {
    entries: Vec<ScheduleRequest>,
}

/// The queue behind its single exclusive-access scope.
pub type SharedQueue = Arc<Mutex<ScheduleQueue>>;

impl ScheduleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedQueue {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Insert preserving sort order. Equal publish times keep their
    /// insertion order.
    pub fn insert(&mut self, req: ScheduleRequest) {
        let at = self
            .entries
            .partition_point(|e| e.publish_at <= req.publish_at);
        self.entries.insert(at, req);
    }

    /// The head, only if it is due at `now`. Non-mutating.
    pub fn peek_due(&self, now: DateTime<FixedOffset>) -> Option<&ScheduleRequest> {
        self.entries.first().filter(|e| e.publish_at <= now)
    }

    /// Remove and return the head.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Callers must have peeked a head
    /// under the same lock; an empty pop is a programming error.
    pub fn pop_front(&mut self) -> ScheduleRequest {
        self.entries.remove(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleRequest> {
        self.entries.iter()
    }
}
