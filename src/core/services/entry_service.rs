//! Business logic helpers for managing ledger entries.

use crate::domain::{Entry, EntryDraft, EntryId};
use crate::errors::LedgerError;
use crate::ledger::Ledger;

use super::ServiceResult;

/// Provides validated CRUD helpers for ledger entries.
pub struct EntryService;

impl EntryService {
    /// Validates the draft, adds the entry unpaid, and returns its identifier.
    pub fn add(ledger: &mut Ledger, draft: EntryDraft) -> ServiceResult<EntryId> {
        let entry = draft.into_entry()?;
        Ok(ledger.add(entry))
    }

    /// Replaces the editable fields of the entry identified by `id`.
    pub fn update(ledger: &mut Ledger, id: &EntryId, draft: &EntryDraft) -> ServiceResult<()> {
        let entry = ledger
            .entry_mut(id)
            .ok_or_else(|| LedgerError::EntryNotFound(id.clone()))?;
        draft.apply_to(entry)?;
        Ok(())
    }

    /// Flips the paid flag and returns the new state.
    pub fn toggle_paid(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<bool> {
        ledger
            .toggle_paid(id)
            .ok_or_else(|| LedgerError::EntryNotFound(id.clone()).into())
    }

    /// Removes the entry identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: &EntryId) -> ServiceResult<Entry> {
        ledger
            .remove(id)
            .ok_or_else(|| LedgerError::EntryNotFound(id.clone()).into())
    }

    /// Entries whose name contains `query`, newest first.
    pub fn list<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Entry> {
        ledger.search(query)
    }
}
