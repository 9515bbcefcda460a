use cookie::Cookie;
use std::collections::{hash_map, HashMap};

/**
The name/value pairs a client presented in its `Cookie` request
header(s).

Parsing never fails. Each `;`-separated segment is trimmed and split
on its first `=`. A segment with no `=`, or with an empty name, is
skipped, so a garbage header degrades to "no cookies" rather than to
an error. When a name repeats, the first occurrence wins.

```
use hearth_cookies::RequestCookies;

let cookies = RequestCookies::parse("session_id=abc; theme = dark; junk; =nameless");
assert_eq!(cookies.get("session_id"), Some("abc"));
assert_eq!(cookies.get("theme"), Some("dark"));
assert_eq!(cookies.get("junk"), None);
assert_eq!(cookies.len(), 2);
```
*/
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestCookies(HashMap<String, String>);

impl RequestCookies {
    /// an empty set of cookies
    pub fn new() -> Self {
        Self::default()
    }

    /// parses a single `Cookie` header value
    pub fn parse(header: &str) -> Self {
        let mut cookies = Self::new();
        cookies.extend_from_header(header);
        cookies
    }

    /**
    adds the cookies from another `Cookie` header line. names that are
    already present keep their earlier value.
    */
    pub fn extend_from_header(&mut self, header: &str) {
        for segment in Cookie::split_parse(header) {
            match segment {
                Ok(cookie) => {
                    self.0
                        .entry(cookie.name().to_string())
                        .or_insert_with(|| cookie.value().to_string());
                }

                Err(error) => log::trace!("skipping cookie segment: {error}"),
            }
        }
    }

    /// the value presented for `name`, if any
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// whether a cookie called `name` was presented
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// the number of distinct cookie names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// true when no well-formed cookie was presented
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// iterates over name/value pairs in no particular order
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }
}

/// Iterator returned by [`RequestCookies::iter`]
#[derive(Debug)]
pub struct Iter<'a>(hash_map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<'a> IntoIterator for &'a RequestCookies {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_headers() {
        assert!(RequestCookies::parse("").is_empty());
        assert!(RequestCookies::parse("   ").is_empty());
        assert!(RequestCookies::parse(";;  ; ").is_empty());
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let cookies = RequestCookies::parse("novalue; =orphan; good=1;;also=2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("good"), Some("1"));
        assert_eq!(cookies.get("also"), Some("2"));
        assert!(!cookies.contains("novalue"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let cookies = RequestCookies::parse("token=abc==; empty=");
        assert_eq!(cookies.get("token"), Some("abc=="));
        assert_eq!(cookies.get("empty"), Some(""));
    }

    #[test]
    fn first_occurrence_wins() {
        let mut cookies = RequestCookies::parse("session_id=first; session_id=second");
        cookies.extend_from_header("session_id=third; other=x");
        assert_eq!(cookies.get("session_id"), Some("first"));
        assert_eq!(cookies.get("other"), Some("x"));
    }

    #[test]
    fn iteration_yields_every_pair() {
        let cookies = RequestCookies::parse("a=1; b=2");
        let mut pairs = cookies.iter().collect::<Vec<_>>();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
