use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, MutexGuard,
};

use crate::domain::Entry;
use crate::errors::{LedgerError, Result};

use super::EntryStore;

/// Volatile store. Clones share the same backing collection, so a test can
/// keep a handle while the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntryStore {
    entries: Arc<Mutex<Vec<Entry>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Copy of the collection as last saved.
    pub fn snapshot(&self) -> Result<Vec<Entry>> {
        Ok(self.lock()?.clone())
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Entry>>> {
        self.entries
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))
    }
}

impl EntryStore for MemoryEntryStore {
    fn load(&self) -> Result<Vec<Entry>> {
        self.snapshot()
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        *self.lock()? = entries.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let store = MemoryEntryStore::new();
        let handle = store.clone();
        store.save(&[]).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert!(handle.load().unwrap().is_empty());
    }

    #[test]
    fn default_backup_hooks_are_inert() {
        let store = MemoryEntryStore::new();
        assert!(store.list_backups().unwrap().is_empty());
        assert!(store.restore_backup("anything.json").is_err());
    }
}
