use crate::{CookieJar, SetCookie};
use trillium::Conn;

/**
Extension trait adding cookie capacities to [`Conn`].

Important: The [`CookiesHandler`](crate::CookiesHandler) must be
called before any of these functions can be called on a conn.
*/
pub trait CookiesConnExt {
    /// queues a cookie for the response and returns the conn
    fn with_cookie(self, cookie: SetCookie) -> Self;
    /// gets a reference to the cookie jar
    fn cookies(&self) -> &CookieJar;
    /// gets a mutable reference to the cookie jar
    fn cookies_mut(&mut self) -> &mut CookieJar;
}

impl CookiesConnExt for Conn {
    fn cookies(&self) -> &CookieJar {
        self.state()
            .expect("CookiesHandler must be executed before calling CookiesConnExt::cookies")
    }

    fn with_cookie(mut self, cookie: SetCookie) -> Self {
        self.cookies_mut().add(cookie);
        self
    }

    fn cookies_mut(&mut self) -> &mut CookieJar {
        self.state_mut()
            .expect("CookiesHandler must be executed before calling CookiesConnExt::cookies_mut")
    }
}
