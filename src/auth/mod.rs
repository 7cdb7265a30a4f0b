//! Static login gate.
//!
//! The fixed credential pair only hides the ledger from other people using
//! the same device; it is not a security boundary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::errors::{LedgerError, Result};
use crate::utils::{fs::write_atomic, paths};

pub const VALID_USERNAME: &str = "kitakita";
pub const VALID_PASSWORD: &str = "Terang";

/// Case-sensitive comparison against the fixed credential pair.
pub fn verify_credentials(username: &str, password: &str) -> Result<()> {
    if username == VALID_USERNAME && password == VALID_PASSWORD {
        Ok(())
    } else {
        Err(LedgerError::InvalidCredentials)
    }
}

/// Persists the boolean "logged in" flag as JSON.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(root: &Path) -> Self {
        Self::new(paths::session_file_in(root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable flag files count as logged out.
    pub fn is_logged_in(&self) -> bool {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return false;
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => truthy(&value),
            Err(err) => {
                warn!(error = %err, "session flag unreadable; treating as logged out");
                false
            }
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        verify_credentials(username, password)?;
        self.write_flag(true)?;
        info!(user = username, "session started");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.write_flag(false)?;
        info!("session ended");
        Ok(())
    }

    /// Errors with `NotAuthenticated` unless the flag is set.
    pub fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(LedgerError::NotAuthenticated)
        }
    }

    fn write_flag(&self, value: bool) -> Result<()> {
        let json = serde_json::to_string(&value)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

fn truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
