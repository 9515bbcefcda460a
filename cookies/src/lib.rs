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

# the hearth cookie codec and handler

[`RequestCookies`] parses inbound `Cookie` headers, [`SetCookie`]
serializes outbound `Set-Cookie` headers. [`CookiesHandler`] wires both
into a trillium handler sequence.

## example
```
use trillium::Conn;
use hearth_cookies::{CookiesConnExt, CookiesHandler, SetCookie};

async fn handler_that_uses_cookies(conn: Conn) -> Conn {
    let content = if let Some(value) = conn.cookies().get("some_cookie") {
        format!("current cookie value: {value}")
    } else {
        String::from("no cookie value set")
    };

    conn.with_cookie(SetCookie::new("some_cookie", "some-cookie-value"))
        .ok(content)
}

let handler = (CookiesHandler::new(), handler_that_uses_cookies);

use trillium_testing::prelude::*;

assert_ok!(
    get("/").on(&handler),
    "no cookie value set",
    "set-cookie" => "some_cookie=some-cookie-value; Path=/; Max-Age=3600; HttpOnly"
);

assert_ok!(
    get("/").with_request_header("cookie", "some_cookie=hearth").on(&handler),
    "current cookie value: hearth",
    "set-cookie" => "some_cookie=some-cookie-value; Path=/; Max-Age=3600; HttpOnly"
);
```
*/

mod cookie_jar;
pub use cookie_jar::CookieJar;

mod cookies_conn_ext;
pub use cookies_conn_ext::CookiesConnExt;

mod cookies_handler;
pub use cookies_handler::CookiesHandler;

mod request_cookies;
pub use request_cookies::{Iter, RequestCookies};

mod set_cookie;
pub use set_cookie::{serialize_set_cookie, SetCookie, DEFAULT_MAX_AGE};

/**
Parses a raw `Cookie` header value. Alias for [`RequestCookies::parse`]

```
let cookies = hearth_cookies::parse_cookie_header("session_id=abc; session_id=ignored");
assert_eq!(cookies.get("session_id"), Some("abc"));
assert!(hearth_cookies::parse_cookie_header("").is_empty());
```
*/
pub fn parse_cookie_header(header: &str) -> RequestCookies {
    RequestCookies::parse(header)
}
