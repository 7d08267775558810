// Centralized error types for the entry flow

use thiserror::Error;

/// Errors surfaced by the session client
///
/// Every variant maps to one user-facing message; none are retried.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx answer; carries the server `detail` or a generic fallback
    #[error("{0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl SessionError {
    /// Text shown to the player in a toast
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Network(_) => "SERVER UNREACHABLE".to_string(),
            SessionError::Auth(message) => message.clone(),
            SessionError::MalformedResponse(_) => "UNEXPECTED SERVER RESPONSE".to_string(),
            SessionError::Storage(_) => "COULD NOT SAVE SESSION".to_string(),
        }
    }
}

/// Why a single form field was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    #[error("TOO SHORT (MIN {min})")]
    TooShort { min: usize },

    #[error("TOO LONG (MAX {max})")]
    TooLong { max: usize },

    #[error("LETTERS, NUMBERS, _ ONLY")]
    InvalidCharacters,

    #[error("USERNAME TAKEN")]
    Taken,

    #[error("PASSWORDS DON'T MATCH")]
    PasswordMismatch,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(#[source] std::io::Error),

    #[error("Failed to write to store: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to read store: {0}")]
    Read(#[source] std::io::Error),

    #[error("Invalid store record: {0}")]
    InvalidRecord(String),

    #[error("Store lock poisoned")]
    Poisoned,
}
