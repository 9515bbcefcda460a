use crate::{Flash, FlashKind, SessionId};
use dashmap::{mapref::entry::Entry, DashMap};
use std::{collections::VecDeque, sync::Arc};

/// How many undelivered flashes a single identifier may hold
pub const DEFAULT_CAPACITY: usize = 16;

/**
# Per-identifier FIFO queues of one-time messages

Queues are keyed by [`SessionId`] rather than stored on the
[`Session`](crate::Session) itself, because a flash often has to be
queued for a visitor who has no session yet, such as after a failed
login. Such a visitor is handed a fresh identifier in a cookie, and
the flash is delivered when that identifier comes back.

Reads are destructive. A popped message is out of the queue before
[`FlashQueue::pop_one`] returns, and an emptied queue is removed
entirely. Each pop holds the shard lock for the identifier, so two
concurrent requests can never both observe the same message.

```
use hearth_sessions::{FlashKind, FlashQueue, SessionId};

let flashes = FlashQueue::new();
let id = SessionId::generate();
flashes.push(&id, FlashKind::Success, "saved");

let flash = flashes.pop_one(&id).unwrap();
assert_eq!((flash.kind(), flash.message()), (FlashKind::Success, "saved"));
assert!(flashes.pop_one(&id).is_none());
```
*/
#[derive(Clone, Debug)]
pub struct FlashQueue {
    queues: Arc<DashMap<SessionId, VecDeque<Flash>>>,
    capacity: usize,
}

impl Default for FlashQueue {
    fn default() -> Self {
        Self {
            queues: Default::default(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl FlashQueue {
    /// builds an empty queue set holding up to [`DEFAULT_CAPACITY`]
    /// messages per identifier
    pub fn new() -> Self {
        Self::default()
    }

    /// sets the per-identifier cap. once full, the oldest message is
    /// dropped to make room
    pub fn with_capacity_per_session(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// appends a message to the queue for `id`
    pub fn push(&self, id: &SessionId, kind: FlashKind, message: impl Into<String>) {
        let mut queue = self.queues.entry(id.clone()).or_default();
        if queue.len() >= self.capacity {
            queue.pop_front();
            log::warn!("flash queue for {id:?} is full, dropping the oldest message");
        }
        queue.push_back(Flash::new(kind, message));
    }

    /// removes and returns the oldest message for `id`
    pub fn pop_one(&self, id: &SessionId) -> Option<Flash> {
        match self.queues.entry(id.clone()) {
            Entry::Occupied(mut entry) => {
                let flash = entry.get_mut().pop_front();
                if entry.get().is_empty() {
                    entry.remove();
                }
                flash
            }

            Entry::Vacant(_) => None,
        }
    }

    /// removes and returns every message for `id`, oldest first
    pub fn drain(&self, id: &SessionId) -> Vec<Flash> {
        self.queues
            .remove(id)
            .map(|(_, queue)| Vec::from(queue))
            .unwrap_or_default()
    }

    /// drops every message for `id`, returning how many there were
    pub fn discard(&self, id: &SessionId) -> usize {
        self.drain(id).len()
    }

    /// the number of undelivered messages for `id`
    pub fn len(&self, id: &SessionId) -> usize {
        self.queues.get(id).map_or(0, |queue| queue.len())
    }

    /// the number of identifiers with undelivered messages
    pub fn pending_sessions(&self) -> usize {
        self.queues.len()
    }
}
