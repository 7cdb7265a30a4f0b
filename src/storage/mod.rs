pub mod json_backend;
pub mod memory;

use std::path::PathBuf;

use crate::domain::Entry;
use crate::errors::{LedgerError, Result};

pub use json_backend::JsonEntryStore;
pub use memory::MemoryEntryStore;

/// Describes a persisted snapshot of the entry collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Persistence for the whole entry collection. The collection is read once
/// per session and written back in full after every mutation.
pub trait EntryStore: Send + Sync {
    fn load(&self) -> Result<Vec<Entry>>;
    fn save(&self, entries: &[Entry]) -> Result<()>;

    /// Snapshots kept by the backend, newest first.
    fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        Ok(Vec::new())
    }

    /// Replaces the stored collection with the named snapshot and returns it.
    fn restore_backup(&self, name: &str) -> Result<Vec<Entry>> {
        Err(LedgerError::Storage(format!(
            "backup `{name}` not found: this store keeps no backups"
        )))
    }
}
