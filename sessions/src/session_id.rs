use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use std::{
    borrow::Borrow,
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
};

const ID_BYTES: usize = 32;
const ENCODED_LEN: usize = 43;
const SHORT_LEN: usize = 8;

/**
An opaque, unguessable session identifier.

Generated identifiers are 32 bytes from the operating system's CSPRNG,
encoded as unpadded url-safe base64. Values presented by a client are
wrapped as-is with [`From`]; use [`SessionId::is_well_formed`] to tell
whether such a value could have been produced by
[`SessionId::generate`].

The [`Debug`] representation only shows a short prefix so that ids do
not end up whole in logs.
*/
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// generates a fresh random identifier
    pub fn generate() -> Self {
        let mut bytes = [0u8; ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// the full token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// the first few characters of the token, for display
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_LEN) {
            Some((index, _)) => &self.0[..index],
            None => &self.0,
        }
    }

    /// whether this has the shape of a generated identifier
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == ENCODED_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Deref for SessionId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}..)", self.short())
    }
}
