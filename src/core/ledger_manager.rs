use tracing::{info, warn};

use crate::core::services::{EntryService, ReportService, ServiceResult};
use crate::domain::{Entry, EntryDraft, EntryId};
use crate::errors::Result;
use crate::ledger::Ledger;
use crate::report::{GroupBy, Report, ReportFilter};
use crate::storage::{BackupInfo, EntryStore};

/// Facade that owns the in-memory ledger and writes it back to the store
/// after every successful mutation.
pub struct LedgerManager {
    ledger: Ledger,
    store: Box<dyn EntryStore>,
}

impl LedgerManager {
    /// Loads the stored collection once. A store that cannot be read yields
    /// an empty ledger rather than an error.
    pub fn open(store: Box<dyn EntryStore>) -> Self {
        let ledger = match store.load() {
            Ok(entries) => Ledger::from_entries(entries),
            Err(err) => {
                warn!(error = %err, "failed to load entries; starting with an empty ledger");
                Ledger::new()
            }
        };
        Self { ledger, store }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Resolves a full identifier or a unique prefix of one.
    pub fn resolve(&self, needle: &str) -> Result<EntryId> {
        self.ledger.resolve_id(needle)
    }

    pub fn add(&mut self, draft: EntryDraft) -> ServiceResult<EntryId> {
        let id = EntryService::add(&mut self.ledger, draft)?;
        self.save()?;
        Ok(id)
    }

    pub fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> ServiceResult<()> {
        EntryService::update(&mut self.ledger, id, draft)?;
        self.save()?;
        Ok(())
    }

    pub fn toggle_paid(&mut self, id: &EntryId) -> ServiceResult<bool> {
        let paid = EntryService::toggle_paid(&mut self.ledger, id)?;
        self.save()?;
        Ok(paid)
    }

    pub fn remove(&mut self, id: &EntryId) -> ServiceResult<Entry> {
        let removed = EntryService::remove(&mut self.ledger, id)?;
        self.save()?;
        Ok(removed)
    }

    pub fn list(&self, query: &str) -> Vec<&Entry> {
        EntryService::list(&self.ledger, query)
    }

    pub fn report(&self, filter: &ReportFilter, group_by: GroupBy) -> Report {
        ReportService::report(&self.ledger, filter, group_by)
    }

    /// Writes the full collection back to the store.
    pub fn save(&self) -> Result<()> {
        self.store.save(self.ledger.entries())
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        self.store.list_backups()
    }

    /// Replaces the ledger with a stored snapshot and returns its entry count.
    pub fn restore_backup(&mut self, name: &str) -> Result<usize> {
        let entries = self.store.restore_backup(name)?;
        let count = entries.len();
        self.ledger = Ledger::from_entries(entries);
        info!(backup = name, count, "restored entries from backup");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryKind;
    use crate::storage::MemoryEntryStore;
    use chrono::NaiveDate;

    fn draft(name: &str, amount: f64) -> EntryDraft {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        EntryDraft::new(name, EntryKind::Expense, amount, date)
    }

    #[test]
    fn every_mutation_is_persisted() {
        let store = MemoryEntryStore::new();
        let mut manager = LedgerManager::open(Box::new(store.clone()));

        let id = manager.add(draft("Listrik", 150_000.0)).unwrap();
        assert_eq!(store.save_count(), 1);
        manager.toggle_paid(&id).unwrap();
        manager.update(&id, &draft("Listrik PLN", 155_000.0)).unwrap();
        assert_eq!(store.save_count(), 3);

        let saved = store.snapshot().unwrap();
        assert_eq!(saved[0].name, "Listrik PLN");
        assert_eq!(saved[0].amount, 155_000);
        assert!(saved[0].paid);

        manager.remove(&id).unwrap();
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn failed_validation_skips_save() {
        let store = MemoryEntryStore::new();
        let mut manager = LedgerManager::open(Box::new(store.clone()));
        assert!(manager.add(draft("  ", 10.0)).is_err());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn open_reads_existing_entries() {
        let entry = draft("Air", 60_000.0).into_entry().unwrap();
        let store = MemoryEntryStore::with_entries(vec![entry.clone()]);
        let manager = LedgerManager::open(Box::new(store));
        assert_eq!(manager.ledger().len(), 1);
        assert_eq!(manager.resolve(entry.id.short()).unwrap(), entry.id);
    }

    #[test]
    fn memory_store_has_no_backups_to_restore() {
        let mut manager = LedgerManager::open(Box::new(MemoryEntryStore::new()));
        assert!(manager.list_backups().unwrap().is_empty());
        assert!(manager.restore_backup("entries_x.json").is_err());
    }
}
