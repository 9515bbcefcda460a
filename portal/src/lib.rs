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
# hearth portal

A small login portal composed from the hearth crates: a login form, a
protected profile page, logout, and one-time flash messages carried
across redirects.

| route           | behavior                                                  |
|-----------------|-----------------------------------------------------------|
| `GET /`         | login form, or a redirect to `/profile` when logged in     |
| `POST /login`   | checks the form, then redirects to `/profile` or back to `/` |
| `GET /profile`  | the logged-in user's details, or a redirect to `/`         |
| `GET /messages` | queues a flash for a logged-in user, redirects to `/profile` |
| `GET /logout`   | ends the session and redirects to `/`                      |

```
use hearth_portal::{app, PortalConfig};
use trillium_testing::prelude::*;

let app = app(PortalConfig::new());
let conn = get("/profile").on(&app);
assert_status!(&conn, 302);
assert_eq!(conn.response_headers().get_str("location"), Some("/"));
```
*/

mod config;
pub use config::PortalConfig;

mod login_form;
pub use login_form::{LoginError, LoginForm};

mod routes;

use hearth_cookies::CookiesHandler;
use hearth_sessions::{FlashQueue, SessionHandler, SessionStore};
use hearth_templates::{Templates, TemplatesHandler};
use trillium::{Handler, State};
use trillium_logger::Logger;
use trillium_router::Router;

/// The page templates, compiled into the binary
pub fn templates() -> Templates {
    Templates::new()
        .with_template("layout.html", include_str!("../templates/layout.html"))
        .with_template("flash.html", include_str!("../templates/flash.html"))
        .with_template("login.html", include_str!("../templates/login.html"))
        .with_template("profile.html", include_str!("../templates/profile.html"))
        .with_template("not_found.html", include_str!("../templates/not_found.html"))
}

/// The portal's routes
pub fn router() -> Router {
    Router::new()
        .get("/", routes::login_page)
        .post("/login", routes::login)
        .get("/profile", routes::profile)
        .get("/messages", routes::messages)
        .get("/logout", routes::logout)
}

/// The complete portal handler with fresh session and flash storage
pub fn app(config: PortalConfig) -> impl Handler {
    let store = match config.idle_timeout() {
        Some(idle_timeout) => SessionStore::new().with_idle_timeout(idle_timeout),
        None => SessionStore::new(),
    };

    app_with(config, store, FlashQueue::new())
}

/// The complete portal handler over existing session and flash storage
pub fn app_with(config: PortalConfig, store: SessionStore, flashes: FlashQueue) -> impl Handler {
    (
        Logger::new(),
        CookiesHandler::new(),
        SessionHandler::new(store, flashes),
        TemplatesHandler::new(templates()),
        State::new(config),
        router(),
        routes::not_found,
    )
}
