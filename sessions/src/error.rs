use thiserror::Error;

/// Errors from session and flash operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// a session attribute could not be represented as json
    #[error("session attribute could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    /// the identifier does not name a live session
    #[error("no live session for this identifier")]
    SessionNotFound,

    /// a flash kind string was not one of the known kinds
    #[error("unknown flash kind {0:?}")]
    UnknownFlashKind(String),
}

/// Result type for this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
