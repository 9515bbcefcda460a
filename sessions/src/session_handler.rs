use crate::{FlashQueue, Session, SessionId, SessionStore};
use hearth_cookies::{CookieJar, CookiesConnExt, SetCookie, DEFAULT_MAX_AGE};
use std::fmt::{self, Debug, Formatter};
use trillium::{async_trait, Conn, Handler};

/// The cookie name used unless [`SessionHandler::with_cookie_name`] is called
pub const DEFAULT_COOKIE_NAME: &str = "session_id";

/**
# Handler to enable sessions and flash messages.

On each request the handler reads the session cookie, resolves it
through the [`SessionStore`] and records activity on the session. The
outcome, authenticated or anonymous, is available to later handlers
through [`SessionConnExt`](crate::SessionConnExt). Before the response
is sent, any identity change made during the request (a login, a
logout, or a fresh identifier minted for an anonymous flash) is
written out as a `Set-Cookie` header.

This handler must run after
[`CookiesHandler`](hearth_cookies::CookiesHandler), and the two must be
in the same handler sequence so that the cookie is queued before the
cookies handler writes the response headers.

# Defaults
* cookie name: `session_id`
* cookie path: `/`
* max-age: one hour

```
use hearth_cookies::CookiesHandler;
use hearth_sessions::{FlashQueue, SessionHandler, SessionStore};

let handler = (
    CookiesHandler::new(),
    SessionHandler::new(SessionStore::new(), FlashQueue::new())
        .with_cookie_name("portal.sid")
        .with_cookie_path("/portal")
        .with_max_age(15 * 60),
);
```
*/
#[derive(Clone)]
pub struct SessionHandler {
    store: SessionStore,
    flashes: FlashQueue,
    cookie_name: String,
    cookie_path: String,
    max_age: i64,
}

impl Debug for SessionHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandler")
            .field("sessions", &self.store.len())
            .field("flashes", &self.flashes.pending_sessions())
            .field("cookie_name", &self.cookie_name)
            .field("cookie_path", &self.cookie_path)
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl SessionHandler {
    /// Constructs a SessionHandler over the given store and flash
    /// queue. Both are shared handles, so clones kept elsewhere observe
    /// the same sessions.
    pub fn new(store: SessionStore, flashes: FlashQueue) -> Self {
        Self {
            store,
            flashes,
            cookie_name: DEFAULT_COOKIE_NAME.into(),
            cookie_path: "/".into(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Sets the name of the cookie that carries the session identifier.
    /// The default is "session_id"
    pub fn with_cookie_name(mut self, cookie_name: impl AsRef<str>) -> Self {
        cookie_name.as_ref().clone_into(&mut self.cookie_name);
        self
    }

    /// Sets a cookie path for this session handler.
    /// The default for this value is "/"
    pub fn with_cookie_path(mut self, cookie_path: impl AsRef<str>) -> Self {
        cookie_path.as_ref().clone_into(&mut self.cookie_path);
        self
    }

    /// Sets the max-age, in seconds, sent with a newly issued session
    /// cookie. The default is 3600
    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = max_age;
        self
    }

    /// the shared session store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// the shared flash queue
    pub fn flashes(&self) -> &FlashQueue {
        &self.flashes
    }

    fn build_cookie(&self, change: CookieChange) -> SetCookie {
        match change {
            CookieChange::Issue(id) => SetCookie::new(&self.cookie_name, id.as_str())
                .with_path(&self.cookie_path)
                .with_max_age(self.max_age),

            CookieChange::Remove => {
                SetCookie::removal(&self.cookie_name).with_path(&self.cookie_path)
            }
        }
    }
}

/**
Alias for [`SessionHandler::new`]

```
use hearth_cookies::CookiesHandler;
use hearth_sessions::{sessions, FlashQueue, SessionConnExt, SessionStore};
use trillium_testing::prelude::*;

let handler = (
    CookiesHandler::new(),
    sessions(SessionStore::new(), FlashQueue::new()),
    |conn: trillium::Conn| async move {
        let body = if conn.is_authenticated() { "known" } else { "anonymous" };
        conn.ok(body)
    },
);

assert_ok!(get("/").on(&handler), "anonymous");
```
*/
pub fn sessions(store: SessionStore, flashes: FlashQueue) -> SessionHandler {
    SessionHandler::new(store, flashes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CookieChange {
    Issue(SessionId),
    Remove,
}

/// Per-conn session state, placed by [`SessionHandler::run`]
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) store: SessionStore,
    pub(crate) flashes: FlashQueue,
    pub(crate) presented: Option<SessionId>,
    pub(crate) session: Option<Session>,
    pub(crate) cookie: Option<CookieChange>,
}

#[async_trait]
impl Handler for SessionHandler {
    async fn run(&self, conn: Conn) -> Conn {
        let presented = conn
            .cookies()
            .get(&self.cookie_name)
            .filter(|value| !value.is_empty())
            .map(SessionId::from);

        let session = presented.as_ref().and_then(|id| {
            self.store.update(id, |session| {
                session.touch();
                session.clone()
            })
        });

        if let (Some(id), None) = (&presented, &session) {
            log::trace!("{id:?} does not name a live session");
        }

        conn.with_state(SessionState {
            store: self.store.clone(),
            flashes: self.flashes.clone(),
            presented,
            session,
            cookie: None,
        })
    }

    async fn before_send(&self, mut conn: Conn) -> Conn {
        let Some(change) = conn
            .state_mut::<SessionState>()
            .and_then(|state| state.cookie.take())
        else {
            return conn;
        };

        let cookie = self.build_cookie(change);
        match conn.state_mut::<CookieJar>() {
            Some(jar) => jar.add(cookie),
            None => log::error!(
                "session cookie {} was dropped, CookiesHandler must run before SessionHandler",
                cookie.name()
            ),
        }

        conn
    }
}
