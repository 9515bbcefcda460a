use std::io;
use thiserror::Error;

/// Errors from loading or rendering templates
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// no template is registered or stored under this name
    #[error("template {name:?} not found")]
    NotFound {
        /// the requested template name
        name: String,
    },

    /// the template exists but could not be read
    #[error("could not read template {name:?}: {source}")]
    Io {
        /// the requested template name
        name: String,
        /// the underlying io error
        source: io::Error,
    },

    /// a glob pattern passed to [`Templates::glob`](crate::Templates::glob)
    /// was invalid
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// whether this is a [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::NotFound { name: name.into() }
    }
}

/// Result type for this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
