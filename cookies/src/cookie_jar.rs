use crate::{RequestCookies, SetCookie};

/**
Per-conn cookie state: the cookies the client sent, plus the
`Set-Cookie` values queued for the response.

Queuing a cookie does not change what [`CookieJar::get`] returns; that
always reflects the request.
*/
#[derive(Clone, Debug, Default)]
pub struct CookieJar {
    request: RequestCookies,
    delta: Vec<SetCookie>,
}

impl CookieJar {
    /// builds a jar from the parsed request cookies
    pub fn new(request: RequestCookies) -> Self {
        Self {
            request,
            delta: Vec::new(),
        }
    }

    /// the value the client presented for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.request.get(name)
    }

    /// all request cookies
    pub fn request(&self) -> &RequestCookies {
        &self.request
    }

    /// queues a cookie for the response, replacing any queued cookie
    /// with the same name
    pub fn add(&mut self, cookie: SetCookie) {
        self.delta.retain(|queued| queued.name() != cookie.name());
        self.delta.push(cookie);
    }

    /// queues a removal for `name` at path `/`
    pub fn remove(&mut self, name: &str) {
        self.add(SetCookie::removal(name));
    }

    /// the cookies queued for the response, in queue order
    pub fn delta(&self) -> impl Iterator<Item = &SetCookie> {
        self.delta.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_per_name_wins() {
        let mut jar = CookieJar::new(RequestCookies::parse("session_id=old"));
        jar.add(SetCookie::new("session_id", "new"));
        jar.add(SetCookie::new("theme", "dark"));
        jar.remove("session_id");

        let delta = jar.delta().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            delta,
            vec![
                "theme=dark; Path=/; Max-Age=3600; HttpOnly",
                "session_id=; Path=/; Max-Age=0",
            ]
        );

        assert_eq!(jar.get("session_id"), Some("old"));
    }
}
