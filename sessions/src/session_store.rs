use crate::{session::Attributes, Error, Result, Session, SessionId};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use std::{sync::Arc, time::Duration};

/**
# Process-wide in-memory session storage

A `SessionStore` is a cheaply cloneable handle; every clone shares the
same map. Construct one at server start and hand clones to whatever
needs it.

The map is sharded. Operations on different identifiers can proceed
in parallel, operations on the same identifier are serialized by the
shard lock, and no lock is held longer than a single map operation.

Lookups never fail: an unknown, destroyed, or expired identifier is
simply `None`, which callers treat as anonymous.

```
use hearth_sessions::{Attributes, SessionStore};

let store = SessionStore::new();
let mut attributes = Attributes::new();
attributes.insert("username".into(), "admin".into());

let id = store.create(attributes);
assert_eq!(store.get(&id).unwrap().get_str("username"), Some("admin"));

store.destroy(&id);
assert!(store.get(&id).is_none());
store.destroy(&id); // idempotent
```
*/
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, Session>>,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    /// builds an empty store with no idle timeout
    pub fn new() -> Self {
        Self::default()
    }

    /**
    evicts sessions that have not been touched for `idle_timeout`.
    expiry is checked lazily on access with a monotonic clock; there is
    no background sweep, see [`SessionStore::purge_expired`]
    */
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = Some(idle_timeout);
        self
    }

    /// stores a new session with the given attributes and returns its
    /// freshly generated identifier
    pub fn create(&self, attributes: Attributes) -> SessionId {
        loop {
            let id = SessionId::generate();
            if let Entry::Vacant(entry) = self.sessions.entry(id.clone()) {
                entry.insert(Session::new(id.clone(), attributes));
                log::debug!("created session {id:?}");
                return id;
            }

            log::warn!("session id collision, regenerating");
        }
    }

    /// a snapshot of the live session for `id`
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        if self.evict_if_expired(id) {
            return None;
        }

        self.sessions.get(id).map(|session| session.value().clone())
    }

    /// records activity on `id`. returns false if there is no live session
    pub fn touch(&self, id: &SessionId) -> bool {
        self.update(id, Session::touch).is_some()
    }

    /**
    runs `f` against the stored session while holding its shard lock,
    returning None if there is no live session. keep `f` short: no
    rendering or io.
    */
    pub fn update<F, R>(&self, id: &SessionId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        if self.evict_if_expired(id) {
            return None;
        }

        self.sessions.get_mut(id).map(|mut session| f(session.value_mut()))
    }

    /// sets a single attribute on the stored session
    pub fn insert_attribute(
        &self,
        id: &SessionId,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<()> {
        self.update(id, |session| session.insert(key, value))
            .ok_or(Error::SessionNotFound)?
    }

    /// removes the session. returns whether one was live
    pub fn destroy(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            log::debug!("destroyed session {id:?}");
        }
        removed
    }

    /// evicts every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let Some(idle_timeout) = self.idle_timeout else {
            return 0;
        };

        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.idle_time() < idle_timeout);
        before.saturating_sub(self.sessions.len())
    }

    /// the number of stored sessions, including any not yet evicted
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// true if no sessions are stored
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_if_expired(&self, id: &SessionId) -> bool {
        let Some(idle_timeout) = self.idle_timeout else {
            return false;
        };

        let evicted = self
            .sessions
            .remove_if(id, |_, session| session.idle_time() >= idle_timeout)
            .is_some();

        if evicted {
            log::debug!("evicted idle session {id:?}");
        }

        evicted
    }
}
