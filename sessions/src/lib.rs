#![forbid(unsafe_code)]
#![deny(
    missing_copy_implementations,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    unused_qualifications
)]

/*!
# in-memory sessions and flash messages for hearth

Sessions live in a [`SessionStore`], a process-wide concurrent map from
an opaque [`SessionId`] to a [`Session`]. The client only ever holds
the identifier, in a cookie. Identifiers are 32 random bytes from the
operating system, so they cannot be guessed from one another.

One-time messages live in a separate [`FlashQueue`], keyed by the same
identifiers. Keeping them apart from the session record lets a flash
be queued for a visitor who has no session, such as after a failed
login: that visitor is handed a fresh identifier that names no
session, and the flash is shown when the identifier comes back.

### Anonymous flash identifiers

A flash queue keyed by an identifier with no session behind it can be
read or written by anyone who presents that identifier. Only
identifiers with the shape of a generated one are accepted for this,
and a login or logout discards the queue, but the queue is otherwise
as exposed as the cookie carrying it.

```
use trillium::Conn;
use hearth_cookies::CookiesHandler;
use hearth_sessions::{FlashKind, FlashQueue, SessionConnExt, SessionHandler, SessionStore};

let handler = (
    CookiesHandler::new(),
    SessionHandler::new(SessionStore::new(), FlashQueue::new()),
    |mut conn: Conn| async move {
        if conn.is_authenticated() {
            return conn.ok("welcome back");
        }

        match conn.take_flash() {
            Some(flash) => conn.ok(format!("{}: {}", flash.kind(), flash.message())),
            None => conn
                .flash(FlashKind::Info, "please log in")
                .ok("anonymous"),
        }
    },
);

use trillium_testing::prelude::*;

let mut conn = get("/").on(&handler);
assert_ok!(&mut conn, "anonymous");
let cookie = conn.response_headers().get_str("set-cookie").unwrap().to_string();
assert!(cookie.starts_with("session_id="));

let id = cookie.trim_start_matches("session_id=").split(';').next().unwrap();
assert_ok!(
    get("/").with_request_header("cookie", format!("session_id={id}")).on(&handler),
    "info: please log in"
);
```
*/

mod error;
pub use error::{Error, Result};

mod flash;
pub use flash::{Flash, FlashKind};

mod flash_queue;
pub use flash_queue::{FlashQueue, DEFAULT_CAPACITY};

mod session;
pub use session::{Attributes, Session};

mod session_conn_ext;
pub use session_conn_ext::{SessionConnExt, USERNAME_KEY};

mod session_handler;
pub use session_handler::{sessions, SessionHandler, DEFAULT_COOKIE_NAME};

mod session_id;
pub use session_id::SessionId;

mod session_store;
pub use session_store::SessionStore;
