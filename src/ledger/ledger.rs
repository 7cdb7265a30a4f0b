use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{derive_categories, Entry, EntryId, Identifiable};
use crate::errors::{LedgerError, Result};

/// The full collection of entries for the single user.
///
/// Serializes as a bare JSON array, the same shape the store persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a new entry at the front and returns its identifier.
    pub fn add(&mut self, entry: Entry) -> EntryId {
        let id = entry.id.clone();
        debug!(entry = %id, "adding entry");
        self.entries.insert(0, entry);
        id
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn entry_mut(&mut self, id: &EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub fn remove(&mut self, id: &EntryId) -> Option<Entry> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Flips the paid flag, returning the new state.
    pub fn toggle_paid(&mut self, id: &EntryId) -> Option<bool> {
        self.entry_mut(id).map(Entry::toggle_paid)
    }

    /// Resolves a full identifier or a unique prefix of one.
    pub fn resolve_id(&self, needle: &str) -> Result<EntryId> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(LedgerError::UnknownId(needle.to_string()));
        }
        if let Some(entry) = self.entries.iter().find(|e| e.id.as_str() == needle) {
            return Ok(entry.id.clone());
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| entry.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry.id.clone()),
            (Some(_), Some(_)) => Err(LedgerError::AmbiguousId(needle.to_string())),
            (None, _) => Err(LedgerError::UnknownId(needle.to_string())),
        }
    }

    /// Case-insensitive name search, newest date first. An empty query
    /// matches every entry.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let needle = query.to_lowercase();
        let mut found: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    /// Category choices for the entry form.
    pub fn categories(&self, custom: Option<&str>) -> Vec<String> {
        derive_categories(
            self.entries.iter().map(|entry| entry.category.as_str()),
            custom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryDraft, EntryKind, DEFAULT_CATEGORIES};
    use chrono::NaiveDate;

    fn entry(name: &str, day: u32) -> Entry {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        EntryDraft::new(name, EntryKind::Expense, 1_000.0, date)
            .into_entry()
            .unwrap()
    }

    #[test]
    fn add_prepends_entries() {
        let mut ledger = Ledger::new();
        ledger.add(entry("first", 1));
        let second = ledger.add(entry("second", 2));
        assert_eq!(ledger.entries()[0].id, second);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn toggle_and_remove_by_id() {
        let mut ledger = Ledger::new();
        let id = ledger.add(entry("Pulsa", 3));
        assert_eq!(ledger.toggle_paid(&id), Some(true));
        assert_eq!(ledger.toggle_paid(&id), Some(false));
        let removed = ledger.remove(&id).expect("entry removed");
        assert_eq!(removed.name, "Pulsa");
        assert!(ledger.is_empty());
        assert_eq!(ledger.toggle_paid(&id), None);
    }

    #[test]
    fn search_is_case_insensitive_and_sorted_by_date_desc() {
        let mut ledger = Ledger::new();
        ledger.add(entry("Makan siang", 1));
        ledger.add(entry("Bensin", 5));
        ledger.add(entry("makan malam", 3));
        let found = ledger.search("MAKAN");
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["makan malam", "Makan siang"]);
        assert_eq!(ledger.search("").len(), 3);
    }

    #[test]
    fn resolve_id_accepts_unique_prefix() {
        let mut ledger = Ledger::new();
        let mut a = entry("a", 1);
        a.id = EntryId::from("aa11");
        let mut b = entry("b", 1);
        b.id = EntryId::from("aa22");
        ledger.add(a);
        ledger.add(b);

        assert_eq!(ledger.resolve_id("aa1").unwrap(), EntryId::from("aa11"));
        assert!(matches!(
            ledger.resolve_id("aa"),
            Err(LedgerError::AmbiguousId(_))
        ));
        assert!(matches!(
            ledger.resolve_id("zz"),
            Err(LedgerError::UnknownId(_))
        ));
    }

    #[test]
    fn categories_include_observed_values() {
        let mut ledger = Ledger::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let custom = EntryDraft::new("Kursus", EntryKind::Expense, 10.0, date)
            .with_custom_category("Kursus Online")
            .into_entry()
            .unwrap();
        ledger.add(custom);
        let categories = ledger.categories(None);
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len() + 1);
        assert!(categories.contains(&"Kursus Online".to_string()));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut ledger = Ledger::new();
        ledger.add(entry("Air", 2));
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
