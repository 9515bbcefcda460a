use crate::{
    session::Attributes,
    session_handler::{CookieChange, SessionState},
    Error, Flash, FlashKind, Session, SessionId,
};
use serde::Serialize;
use trillium::Conn;

/// The attribute [`SessionConnExt::is_authenticated`] looks for
pub const USERNAME_KEY: &str = "username";

/**
extension trait to add session and flash support to [`Conn`]

[`SessionHandler`](crate::SessionHandler) **MUST** be called on the
conn prior to using any of these functions.

A conn is authenticated when it presented the identifier of a live
session that carries a `username` attribute. Everything else,
including a destroyed or unknown identifier, is anonymous.
*/
pub trait SessionConnExt {
    /// the live session for this request, if any
    fn session(&self) -> Option<&Session>;

    /// the identifier of the live session for this request, if any
    fn session_id(&self) -> Option<&SessionId>;

    /// whether the live session carries a username
    fn is_authenticated(&self) -> bool;

    /**
    creates a new session with `attributes` and sends its identifier
    to the client. a session presented with this request is destroyed
    first, so a login always yields a fresh identifier.
    */
    fn log_in(self, attributes: Attributes) -> Self;

    /**
    destroys the live session and any flashes queued for this visitor,
    and tells the client to discard the session cookie
    */
    fn log_out(self) -> Self;

    /**
    sets an attribute on the live session, where the key is a &str and
    the value is anything serde-serializable. has no effect on an
    anonymous conn.
    */
    fn with_session(self, key: &str, value: impl Serialize) -> Self;

    /**
    queues a flash for the next page this visitor loads. an anonymous
    visitor without a usable identifier is assigned a fresh one, which
    is sent in the session cookie without creating a session.
    */
    fn flash(self, kind: FlashKind, message: impl Into<String>) -> Self;

    /// removes and returns the oldest queued flash for this visitor
    fn take_flash(&mut self) -> Option<Flash>;

    /// removes and returns every queued flash for this visitor
    fn take_flashes(&mut self) -> Vec<Flash>;
}

fn state(conn: &Conn) -> &SessionState {
    conn.state()
        .expect("SessionHandler must be executed before calling SessionConnExt")
}

fn state_mut(conn: &mut Conn) -> &mut SessionState {
    conn.state_mut()
        .expect("SessionHandler must be executed before calling SessionConnExt")
}

impl SessionState {
    fn flash_reader(&self) -> Option<&SessionId> {
        match (&self.session, &self.cookie) {
            (Some(session), _) => Some(session.id()),
            (None, Some(CookieChange::Issue(id))) => Some(id),
            (None, _) => self.presented.as_ref().filter(|id| id.is_well_formed()),
        }
    }

    fn flash_writer(&mut self) -> SessionId {
        if let Some(id) = self.flash_reader() {
            return id.clone();
        }

        let id = SessionId::generate();
        log::debug!("issuing {id:?} to carry an anonymous flash");
        self.cookie = Some(CookieChange::Issue(id.clone()));
        id
    }
}

impl SessionConnExt for Conn {
    fn session(&self) -> Option<&Session> {
        state(self).session.as_ref()
    }

    fn session_id(&self) -> Option<&SessionId> {
        self.session().map(Session::id)
    }

    fn is_authenticated(&self) -> bool {
        self.session()
            .and_then(|session| session.get_str(USERNAME_KEY))
            .is_some()
    }

    fn log_in(mut self, attributes: Attributes) -> Self {
        let state = state_mut(&mut self);

        if let Some(previous) = state.session.take() {
            state.store.destroy(previous.id());
            state.flashes.discard(previous.id());
        }

        if let Some(presented) = state.presented.take() {
            state.flashes.discard(&presented);
        }

        let id = state.store.create(attributes);
        state.session = state.store.get(&id);
        state.cookie = Some(CookieChange::Issue(id));
        self
    }

    fn log_out(mut self) -> Self {
        let state = state_mut(&mut self);

        if let Some(session) = state.session.take() {
            state.store.destroy(session.id());
            state.flashes.discard(session.id());
        }

        if let Some(presented) = state.presented.take() {
            state.flashes.discard(&presented);
        }

        state.cookie = Some(CookieChange::Remove);
        self
    }

    fn with_session(mut self, key: &str, value: impl Serialize) -> Self {
        let state = state_mut(&mut self);
        let Some(session) = state.session.as_mut() else {
            log::warn!("ignoring session attribute {key} on an anonymous conn");
            return self;
        };

        let stored = serde_json::to_value(value)
            .map_err(Error::from)
            .and_then(|value| {
                session.insert(key, &value)?;
                state.store.insert_attribute(session.id(), key, value)
            });

        if let Err(e) = stored {
            log::error!("could not set session attribute {key}: {e}");
        }

        self
    }

    fn flash(mut self, kind: FlashKind, message: impl Into<String>) -> Self {
        let state = state_mut(&mut self);
        let id = state.flash_writer();
        state.flashes.push(&id, kind, message);
        self
    }

    fn take_flash(&mut self) -> Option<Flash> {
        let state = state_mut(self);
        let id = state.flash_reader()?;
        state.flashes.pop_one(id)
    }

    fn take_flashes(&mut self) -> Vec<Flash> {
        let state = state_mut(self);
        match state.flash_reader() {
            Some(id) => state.flashes.drain(id),
            None => Vec::new(),
        }
    }
}
