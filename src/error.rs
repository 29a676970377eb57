// src/error.rs
//
// One error type for the whole crate. Variants fall into the four families
// callers care about (see `ErrorKind`), plus configuration problems.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The site rejected the credentials.
    #[error("login rejected for {username}")]
    Auth { username: String },

    /// Expected markup was missing or had no known shape. Usually means the
    /// site changed its pages.
    #[error("unexpected page content: expected {expected}")]
    Content { expected: String },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An accessor was called before the session reached the state it needs.
    #[error("{0}")]
    Usage(&'static str),

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Cli(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Content,
    Infrastructure,
    Usage,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth { .. } => ErrorKind::Auth,
            Error::Content { .. } => ErrorKind::Content,
            Error::Http { .. } | Error::Transport(_) | Error::Io(_) => ErrorKind::Infrastructure,
            Error::Usage(_) => ErrorKind::Usage,
            Error::Config(_) | Error::Cli(_) => ErrorKind::Config,
        }
    }
}
