//! Error types for game data resolution.
//!
//! Component methods prefixed with `try_` return [`Result<T>`] so callers and
//! tests can inspect the failure. The fail-soft public methods collapse these
//! errors into `None` or an empty collection after logging them.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure category, stable across the concrete [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport or remote-invocation failure.
    Network,
    /// Malformed JSON or an unrecognized payload shape.
    Parse,
    /// A champion name could not be resolved to an id, or a lookup had no match.
    NotFound,
    /// Cache backend read/write failure.
    Storage,
}

/// Errors that can occur while fetching, normalizing or caching game data.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent or the response body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The payload was not valid JSON or did not match any known shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested entity does not exist in the catalog or payload.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The cache backend failed to read, write or enumerate entries.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) | Error::Http { .. } => ErrorKind::Network,
            Error::Parse(_) => ErrorKind::Parse,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Error::Parse(e.to_string());
        }
        match (e.status(), e.url()) {
            (Some(status), Some(url)) => Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => Error::Network(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
