use std::fmt::{self, Display, Formatter};

/// The max-age, in seconds, of a cookie built with [`SetCookie::new`]
pub const DEFAULT_MAX_AGE: i64 = 60 * 60;

/**
A single `Set-Cookie` response header value.

Only `Path`, `Max-Age` and `HttpOnly` are modeled. The [`Display`]
implementation is the wire form, always in the order
`name=value; Path=path; Max-Age=seconds[; HttpOnly]`.

```
use hearth_cookies::SetCookie;

assert_eq!(
    SetCookie::new("session_id", "abc").to_string(),
    "session_id=abc; Path=/; Max-Age=3600; HttpOnly"
);

assert_eq!(
    SetCookie::removal("session_id").to_string(),
    "session_id=; Path=/; Max-Age=0"
);
```
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCookie {
    name: String,
    value: String,
    path: String,
    max_age: i64,
    http_only: bool,
}

impl SetCookie {
    /**
    builds a cookie with path `/`, a max-age of [`DEFAULT_MAX_AGE`]
    and the http-only flag set
    */
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: String::from("/"),
            max_age: DEFAULT_MAX_AGE,
            http_only: true,
        }
    }

    /**
    builds a cookie that tells the client to discard `name`
    immediately: empty value, path `/`, `Max-Age=0`
    */
    pub fn removal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            path: String::from("/"),
            max_age: 0,
            http_only: false,
        }
    }

    /// sets the path attribute
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// sets the max-age attribute. zero or negative deletes the cookie
    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = max_age;
        self
    }

    /// sets or clears the http-only flag
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// the cookie name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the cookie value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// the path attribute
    pub fn path(&self) -> &str {
        &self.path
    }

    /// the max-age attribute, in seconds
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// whether the http-only flag is set
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// true if this cookie instructs the client to discard it
    pub fn is_removal(&self) -> bool {
        self.max_age <= 0
    }
}

impl Display for SetCookie {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, self.path, self.max_age
        )?;

        if self.http_only {
            f.write_str("; HttpOnly")?;
        }

        Ok(())
    }
}

/// Serializes a `Set-Cookie` header value from its parts.
pub fn serialize_set_cookie(
    name: &str,
    value: &str,
    path: &str,
    max_age: i64,
    http_only: bool,
) -> String {
    SetCookie::new(name, value)
        .with_path(path)
        .with_max_age(max_age)
        .with_http_only(http_only)
        .to_string()
}
