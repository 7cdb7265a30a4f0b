#![allow(dead_code)]

use catatan_core::{
    core::ledger_manager::LedgerManager,
    domain::{Entry, EntryDraft, EntryKind},
    storage::JsonEntryStore,
};
use chrono::NaiveDate;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn entry(name: &str, kind: EntryKind, amount: f64, on: NaiveDate, paid: bool) -> Entry {
    let mut entry = EntryDraft::new(name, kind, amount, on).into_entry().unwrap();
    entry.paid = paid;
    entry
}

/// The two-entry ledger used throughout the report scenarios.
pub fn gaji_and_makan() -> Vec<Entry> {
    vec![
        entry("Gaji", EntryKind::Income, 5_000_000.0, date(2024, 1, 1), true),
        entry("Makan", EntryKind::Expense, 50_000.0, date(2024, 1, 2), false),
    ]
}

/// Manager backed by JSON files in a fresh temporary directory. Keep the
/// returned guard alive for the duration of the test.
pub fn setup_json_manager(retention: usize) -> (TempDir, LedgerManager) {
    let temp = TempDir::new().expect("create temp dir");
    let store = JsonEntryStore::in_dir(temp.path(), retention).expect("create json store");
    let manager = LedgerManager::open(Box::new(store));
    (temp, manager)
}
