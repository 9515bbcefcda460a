use crate::{CookieJar, RequestCookies};
use trillium::{async_trait, Conn, Handler, KnownHeaderName};

/**
The hearth cookie handler. See crate level docs for an example. This
must run before any handlers access the cookie jar.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct CookiesHandler {
    // this is in order to force users to call CookiesHandler::new or
    // CookiesHandler::default, allowing us to add
    // customization/settings later without breaking existing usage
    _priv: (),
}

impl CookiesHandler {
    /// constructs a new cookies handler
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Handler for CookiesHandler {
    async fn run(&self, conn: Conn) -> Conn {
        let mut cookies = RequestCookies::new();

        if let Some(values) = conn.request_headers().get_values(KnownHeaderName::Cookie) {
            for header in values.iter().filter_map(|value| value.as_str()) {
                cookies.extend_from_header(header);
            }
        }

        conn.with_state(CookieJar::new(cookies))
    }

    async fn before_send(&self, mut conn: Conn) -> Conn {
        if let Some(jar) = conn.take_state::<CookieJar>() {
            let headers = conn.response_headers_mut();

            for cookie in jar.delta() {
                headers.append(KnownHeaderName::SetCookie, cookie.to_string());
            }
        }

        conn
    }
}
