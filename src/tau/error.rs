use crate::remote::RemoteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TauError {
    #[error("conflicting flags: only one of {} may be set", .flags.join(", "))]
    UsageConflict { flags: Vec<String> },

    #[error("{kind} `{value}` does not exist in [{}]", .known.join(", "))]
    NotFound {
        kind: &'static str,
        value: String,
        known: Vec<String>,
    },

    #[error("{kind} `{value}` already exists")]
    AlreadyExists { kind: &'static str, value: String },

    #[error("validating `{value}` failed: {source}")]
    ValidationFailed {
        value: String,
        #[source]
        source: RemoteError,
    },

    #[error("{context}: {source}")]
    Collaborator {
        context: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("no {0} available to select")]
    NoCandidates(&'static str),

    #[error("prompt aborted: {0}")]
    PromptAborted(String),

    #[error("no profile selected, run `tau login` first")]
    NotLoggedIn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl TauError {
    pub fn not_found(kind: &'static str, value: impl Into<String>, known: &[String]) -> Self {
        TauError::NotFound {
            kind,
            value: value.into(),
            known: known.to_vec(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TauError>;
