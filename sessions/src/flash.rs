use crate::Error;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The category of a [`Flash`] message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    /// an operation succeeded
    Success,
    /// neutral information
    Info,
    /// something needs attention
    Warning,
    /// an operation failed
    Error,
}

impl FlashKind {
    /// the lowercase name, e.g. `"success"`
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Info => "info",
            FlashKind::Warning => "warning",
            FlashKind::Error => "error",
        }
    }
}

impl Display for FlashKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(FlashKind::Success),
            "info" => Ok(FlashKind::Info),
            "warning" => Ok(FlashKind::Warning),
            "error" => Ok(FlashKind::Error),
            other => Err(Error::UnknownFlashKind(other.to_string())),
        }
    }
}

/// A one-time message shown on the next rendered page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    kind: FlashKind,
    message: String,
}

impl Flash {
    /// builds a flash message
    pub fn new(kind: FlashKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// the category
    pub fn kind(&self) -> FlashKind {
        self.kind
    }

    /// the text body
    pub fn message(&self) -> &str {
        &self.message
    }

    /// splits into kind and message
    pub fn into_parts(self) -> (FlashKind, String) {
        (self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            FlashKind::Success,
            FlashKind::Info,
            FlashKind::Warning,
            FlashKind::Error,
        ] {
            assert_eq!(kind.as_str().parse::<FlashKind>().unwrap(), kind);
        }

        assert!(matches!(
            "danger".parse::<FlashKind>(),
            Err(Error::UnknownFlashKind(kind)) if kind == "danger"
        ));
    }

    #[test]
    fn serializes_lowercase() {
        let flash = Flash::new(FlashKind::Error, "Validation failed");
        assert_eq!(
            serde_json::to_string(&flash).unwrap(),
            r#"{"kind":"error","message":"Validation failed"}"#
        );
    }
}
