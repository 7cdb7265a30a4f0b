use std::result::Result as StdResult;

use thiserror::Error;

use crate::domain::EntryId;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),
    #[error("No entry matches `{0}`")]
    UnknownId(String),
    #[error("Identifier `{0}` matches more than one entry")]
    AmbiguousId(String),
    #[error("{0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Belum masuk. Gunakan `login <username> <password>` terlebih dahulu.")]
    NotAuthenticated,
    #[error("Username atau password salah")]
    InvalidCredentials,
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
