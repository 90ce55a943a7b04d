use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a remote call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCause {
    /// The service answered with something other than 200.
    Status(u16),
    /// The request never produced a response.
    Transport(String),
}

impl fmt::Display for FetchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchCause::Status(code) => write!(f, "HTTP {}", code),
            FetchCause::Transport(reason) => write!(f, "transport error: {}", reason),
        }
    }
}

#[derive(Error, Debug)]
pub enum BrookError {
    #[error("Authentication failed: the service rejected these credentials")]
    AuthFailure,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Failed to fetch {resource}: {cause}")]
    Fetch {
        resource: &'static str,
        cause: FetchCause,
    },

    #[error("Failed to {resource}: {cause}")]
    Mutation {
        resource: &'static str,
        cause: FetchCause,
    },

    #[error("Stored credentials at {} are unreadable: {reason}", path.display())]
    MalformedLocalState { path: PathBuf, reason: String },

    #[error("Could not decode {resource}: {reason}")]
    Decode {
        resource: &'static str,
        reason: String,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BrookError {
    /// Message shown to the user when a command ends with this error.
    pub fn guidance(&self) -> String {
        match self {
            BrookError::AuthFailure => {
                "Authentication failed. Check your email and password and try again.".to_string()
            }
            BrookError::NotAuthenticated => {
                "Not authenticated. Run `brook authenticate <email> <password>` first.".to_string()
            }
            BrookError::MalformedLocalState { .. } => format!(
                "{}. Run `brook authenticate <email> <password>` to store them again.",
                self
            ),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrookError>;
